//! Resize coalescing for container width changes.
//!
//! Hosts report container widths as often as they like (a window drag can
//! produce one report per frame). Recomputing the layout for each of them is
//! wasteful, so the coalescer lets the first change through, parks later
//! changes that arrive within the coalesce window and releases the most
//! recent parked width once the window has elapsed or on [`ResizeCoalescer::flush`].
//!
//! Reports that repeat the applied width are always dropped.

use std::time::{Duration, Instant};

use crate::constants::timing::RESIZE_COALESCE_MS;

/// Collapses bursts of width reports into at most one relayout per window.
#[derive(Debug, Clone)]
pub struct ResizeCoalescer {
    window: Duration,
    applied: Option<u32>,
    applied_at: Option<Instant>,
    pending: Option<u32>,
}

impl Default for ResizeCoalescer {
    fn default() -> Self { Self::new(RESIZE_COALESCE_MS) }
}

impl ResizeCoalescer {
    /// Creates a coalescer with the given window in milliseconds.
    ///
    /// A zero window applies every distinct width immediately.
    #[must_use]
    pub const fn new(window_ms: u64) -> Self {
        Self {
            window: Duration::from_millis(window_ms),
            applied: None,
            applied_at: None,
            pending: None,
        }
    }

    /// Offers a width reported now. See [`offer_at`](Self::offer_at).
    pub fn offer(&mut self, width: u32) -> Option<u32> { self.offer_at(width, Instant::now()) }

    /// Offers a width reported at `now`.
    ///
    /// Returns the width to lay out with, or `None` if the report was a
    /// duplicate or was parked until the window elapses.
    pub fn offer_at(&mut self, width: u32, now: Instant) -> Option<u32> {
        if self.within_window(now) {
            self.pending = (self.applied != Some(width)).then_some(width);
            return None;
        }

        self.pending = None;
        if self.applied == Some(width) {
            return None;
        }
        Some(self.apply(width, now))
    }

    /// Releases a parked width if its window has elapsed at `now`.
    pub fn poll_at(&mut self, now: Instant) -> Option<u32> {
        if self.within_window(now) {
            return None;
        }
        let width = self.pending.take()?;
        Some(self.apply(width, now))
    }

    /// Releases the parked width immediately, if any.
    pub fn flush(&mut self) -> Option<u32> {
        let width = self.pending.take()?;
        Some(self.apply(width, Instant::now()))
    }

    /// When the parked width becomes due, if one is parked.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending?;
        self.applied_at.map(|at| at + self.window)
    }

    /// The last width handed out for layout.
    #[must_use]
    pub const fn applied(&self) -> Option<u32> { self.applied }

    /// The width waiting for the window to elapse.
    #[must_use]
    pub const fn pending(&self) -> Option<u32> { self.pending }

    fn within_window(&self, now: Instant) -> bool {
        self.applied_at
            .is_some_and(|at| now.saturating_duration_since(at) < self.window)
    }

    fn apply(&mut self, width: u32, now: Instant) -> u32 {
        self.applied = Some(width);
        self.applied_at = Some(now);
        width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn ms(n: u64) -> Duration { Duration::from_millis(n) }

    #[test]
    fn test_first_width_applies_immediately() {
        let mut coalescer = ResizeCoalescer::new(16);
        assert_eq!(coalescer.offer_at(1200, Instant::now()), Some(1200));
        assert_eq!(coalescer.applied(), Some(1200));
    }

    #[test]
    fn test_duplicate_width_is_dropped() {
        let mut coalescer = ResizeCoalescer::new(16);
        let start = Instant::now();
        coalescer.offer_at(1200, start);
        assert_eq!(coalescer.offer_at(1200, start + ms(100)), None);
        assert_eq!(coalescer.pending(), None);
    }

    #[test]
    fn test_burst_parks_latest_width() {
        let mut coalescer = ResizeCoalescer::new(16);
        let start = Instant::now();
        coalescer.offer_at(1200, start);

        assert_eq!(coalescer.offer_at(1190, start + ms(2)), None);
        assert_eq!(coalescer.offer_at(1180, start + ms(4)), None);
        assert_eq!(coalescer.pending(), Some(1180));
        assert_eq!(coalescer.deadline(), Some(start + ms(16)));

        assert_eq!(coalescer.poll_at(start + ms(10)), None);
        assert_eq!(coalescer.poll_at(start + ms(16)), Some(1180));
        assert_eq!(coalescer.pending(), None);
    }

    #[test]
    fn test_burst_returning_to_applied_width_parks_nothing() {
        let mut coalescer = ResizeCoalescer::new(16);
        let start = Instant::now();
        coalescer.offer_at(1200, start);
        coalescer.offer_at(1100, start + ms(1));
        coalescer.offer_at(1200, start + ms(2));
        assert_eq!(coalescer.pending(), None);
        assert_eq!(coalescer.deadline(), None);
    }

    #[test]
    fn test_offer_after_window_applies() {
        let mut coalescer = ResizeCoalescer::new(16);
        let start = Instant::now();
        coalescer.offer_at(1200, start);
        coalescer.offer_at(1100, start + ms(5));
        // Newer report after the window supersedes the parked one
        assert_eq!(coalescer.offer_at(1000, start + ms(20)), Some(1000));
        assert_eq!(coalescer.pending(), None);
    }

    #[test]
    fn test_flush_releases_pending() {
        let mut coalescer = ResizeCoalescer::new(1_000);
        coalescer.offer(1200);
        coalescer.offer(900);
        assert_eq!(coalescer.flush(), Some(900));
        assert_eq!(coalescer.flush(), None);
        assert_eq!(coalescer.applied(), Some(900));
    }

    #[test]
    fn test_zero_window_applies_every_change() {
        let mut coalescer = ResizeCoalescer::new(0);
        let now = Instant::now();
        assert_eq!(coalescer.offer_at(1200, now), Some(1200));
        assert_eq!(coalescer.offer_at(900, now), Some(900));
        assert_eq!(coalescer.offer_at(900, now), None);
    }
}
