//! Viewport loader - sentinel-driven pagination trigger.
//!
//! The loader watches the visibility of a sentinel placed below the grid
//! and emits a single "load more" signal each time the sentinel comes into
//! view while more content exists and no page is in flight.
//!
//! # States
//!
//! ```text
//!            hidden -> visible              guards ok
//!   Idle ───────────────────────> Armed ──────────────> fire ──> Idle
//!    ▲  loading: true -> false      │
//!    └──────────────────────────────┘ guards blocked: stay armed
//! ```
//!
//! - A hidden → visible transition arms the loader.
//! - `loading` dropping back to `false` re-arms it (the guards changed).
//! - An armed loader fires on the next visible report when `has_more` is
//!   true and `loading` is false, then disarms.
//! - Once `has_more` turns false the loader is exhausted and never fires
//!   again until [`ViewportLoader::reset`], whatever `has_more` does in the
//!   meantime. After a reset it waits for a fresh visibility transition.
//!
//! The loader never awaits the sink. Callers own setting `loading` promptly
//! after a signal so that repeated notifications cannot double-fire.

use tokio::sync::mpsc;

// ============================================================================
// Sink
// ============================================================================

/// A "load more" signal emitted by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadMoreRequest {
    /// Monotonic sequence number of the signal, starting at 1.
    pub seq: u64,
}

/// Receiver of load-more signals.
pub trait LoadSink {
    /// Called once per fired signal.
    fn load_more(&mut self, request: LoadMoreRequest);
}

impl LoadSink for mpsc::UnboundedSender<LoadMoreRequest> {
    fn load_more(&mut self, request: LoadMoreRequest) {
        if self.send(request).is_err() {
            tracing::debug!(seq = request.seq, "masonry: load-more receiver dropped");
        }
    }
}

/// Adapts a plain closure into a [`LoadSink`].
pub struct Callback<F>(pub F);

impl<F: FnMut()> LoadSink for Callback<F> {
    fn load_more(&mut self, _request: LoadMoreRequest) { (self.0)(); }
}

// ============================================================================
// Footer
// ============================================================================

/// What the renderer should show in place of the sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Footer {
    /// Nothing to show.
    Idle,
    /// A page is in flight.
    Loading,
    /// No more content will be loaded.
    EndOfContent,
}

// ============================================================================
// ViewportLoader
// ============================================================================

/// Visibility-driven load-more trigger for one sentinel.
pub struct ViewportLoader<S> {
    sink: S,
    visible: bool,
    armed: bool,
    has_more: bool,
    loading: bool,
    exhausted: bool,
    fired: u64,
}

impl<S: LoadSink> ViewportLoader<S> {
    /// Creates an idle loader with `has_more = true` and `loading = false`.
    pub const fn new(sink: S) -> Self {
        Self {
            sink,
            visible: false,
            armed: false,
            has_more: true,
            loading: false,
            exhausted: false,
            fired: 0,
        }
    }

    /// Handles a visibility notification for the sentinel.
    ///
    /// Notifications may be batched or repeated; only a hidden → visible
    /// change counts as a transition. Returns `true` if a signal fired.
    pub fn on_visibility(&mut self, visible: bool) -> bool {
        if visible && !self.visible {
            self.armed = true;
        }
        self.visible = visible;

        if visible { self.try_fire() } else { false }
    }

    /// Updates the `loading` guard.
    pub fn set_loading(&mut self, loading: bool) {
        if self.loading && !loading {
            self.armed = true;
        }
        self.loading = loading;
    }

    /// Updates the `has_more` guard.
    ///
    /// `false` exhausts the loader until [`reset`](Self::reset).
    pub fn set_has_more(&mut self, has_more: bool) {
        if !has_more && !self.exhausted {
            tracing::debug!(fired = self.fired, "masonry: feed exhausted");
            self.exhausted = true;
        }
        self.has_more = has_more;
    }

    /// Applies both guards at once.
    pub fn set_flags(&mut self, has_more: bool, loading: bool) {
        self.set_has_more(has_more);
        self.set_loading(loading);
    }

    /// Clears exhaustion after the item list was replaced.
    ///
    /// The loader re-arms only on a fresh hidden → visible transition, not
    /// on this call.
    pub fn reset(&mut self) {
        self.exhausted = false;
        self.has_more = true;
        self.loading = false;
        self.armed = false;
    }

    /// Manual "load more" control for hosts without visibility observation.
    ///
    /// Honours the same guards as a visibility transition. Returns `true`
    /// if a signal fired.
    pub fn request_manual(&mut self) -> bool {
        if self.can_fire() {
            self.fire();
            true
        } else {
            false
        }
    }

    /// Indicator the renderer should show below the grid.
    #[must_use]
    pub const fn footer(&self, item_count: usize) -> Footer {
        if self.loading {
            Footer::Loading
        } else if self.exhausted && item_count > 0 {
            Footer::EndOfContent
        } else {
            Footer::Idle
        }
    }

    /// Whether the sentinel was last reported visible.
    #[must_use]
    pub const fn is_visible(&self) -> bool { self.visible }

    /// Whether the loader is waiting to fire.
    #[must_use]
    pub const fn is_armed(&self) -> bool { self.armed }

    /// Whether `has_more` went false since the last reset.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool { self.exhausted }

    /// Whether a page is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool { self.loading }

    /// Number of signals fired so far.
    #[must_use]
    pub const fn fired(&self) -> u64 { self.fired }

    /// Borrow the sink.
    pub const fn sink(&self) -> &S { &self.sink }

    const fn can_fire(&self) -> bool { self.has_more && !self.loading && !self.exhausted }

    fn try_fire(&mut self) -> bool {
        if self.armed && self.can_fire() {
            self.armed = false;
            self.fire();
            true
        } else {
            false
        }
    }

    fn fire(&mut self) {
        self.fired += 1;
        let request = LoadMoreRequest { seq: self.fired };
        tracing::trace!(seq = request.seq, "masonry: load more");
        self.sink.load_more(request);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    fn counting_loader() -> (ViewportLoader<Callback<impl FnMut()>>, Rc<Cell<u32>>) {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let loader = ViewportLoader::new(Callback(move || counter.set(counter.get() + 1)));
        (loader, calls)
    }

    // ========================================================================
    // Firing
    // ========================================================================

    #[test]
    fn test_visible_transition_fires_once() {
        let (mut loader, calls) = counting_loader();
        assert!(loader.on_visibility(true));
        assert_eq!(calls.get(), 1);
        assert!(!loader.is_armed());
    }

    #[test]
    fn test_repeated_visible_reports_do_not_refire() {
        let (mut loader, calls) = counting_loader();
        loader.on_visibility(true);
        assert!(!loader.on_visibility(true));
        assert!(!loader.on_visibility(true));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_hidden_does_not_fire() {
        let (mut loader, calls) = counting_loader();
        assert!(!loader.on_visibility(false));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_no_fire_while_loading() {
        let (mut loader, calls) = counting_loader();
        loader.on_visibility(true);
        loader.set_loading(true);

        // Toggle visibility while the page is in flight
        loader.on_visibility(false);
        assert!(!loader.on_visibility(true));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_loading_finished_rearms_for_next_visible_report() {
        let (mut loader, calls) = counting_loader();
        loader.on_visibility(true);
        loader.set_loading(true);
        loader.set_loading(false);

        assert!(loader.is_armed());
        assert_eq!(calls.get(), 1);

        // Host re-reports the sentinel still on screen
        assert!(loader.on_visibility(true));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_unsatisfied_signal_stays_idle() {
        let (mut loader, calls) = counting_loader();
        loader.on_visibility(true);
        // Caller never flips `loading`; the sentinel stays visible
        for _ in 0..5 {
            loader.on_visibility(true);
        }
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_blocked_transition_fires_once_guards_clear() {
        let (mut loader, calls) = counting_loader();
        loader.set_loading(true);
        assert!(!loader.on_visibility(true));
        loader.set_loading(false);
        assert!(loader.on_visibility(true));
        assert_eq!(calls.get(), 1);
    }

    // ========================================================================
    // Exhaustion
    // ========================================================================

    #[test]
    fn test_has_more_false_never_fires() {
        let (mut loader, calls) = counting_loader();
        loader.set_has_more(false);
        for _ in 0..3 {
            loader.on_visibility(true);
            loader.on_visibility(false);
        }
        assert_eq!(calls.get(), 0);
        assert!(loader.is_exhausted());
    }

    #[test]
    fn test_has_more_oscillation_stays_exhausted() {
        let (mut loader, calls) = counting_loader();
        loader.set_has_more(false);
        loader.set_has_more(true);
        loader.set_has_more(false);
        loader.set_has_more(true);

        loader.on_visibility(true);
        assert_eq!(calls.get(), 0);
        assert!(!loader.request_manual());
    }

    #[test]
    fn test_reset_requires_fresh_transition() {
        let (mut loader, calls) = counting_loader();
        loader.on_visibility(true);
        loader.set_has_more(false);

        loader.reset();
        assert!(!loader.is_exhausted());

        // Sentinel still visible: no refire on the reset alone
        assert!(!loader.on_visibility(true));
        assert_eq!(calls.get(), 1);

        loader.on_visibility(false);
        assert!(loader.on_visibility(true));
        assert_eq!(calls.get(), 2);
    }

    // ========================================================================
    // Manual control and footer
    // ========================================================================

    #[test]
    fn test_request_manual_honours_guards() {
        let (mut loader, calls) = counting_loader();
        assert!(loader.request_manual());
        loader.set_loading(true);
        assert!(!loader.request_manual());
        loader.set_loading(false);
        assert!(loader.request_manual());
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_footer_states() {
        let (mut loader, _calls) = counting_loader();
        assert_eq!(loader.footer(0), Footer::Idle);

        loader.set_loading(true);
        assert_eq!(loader.footer(10), Footer::Loading);

        loader.set_flags(false, false);
        assert_eq!(loader.footer(10), Footer::EndOfContent);
        assert_eq!(loader.footer(0), Footer::Idle);
    }

    #[test]
    fn test_channel_sink_receives_sequence_numbers() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut loader = ViewportLoader::new(tx);

        loader.on_visibility(true);
        loader.set_loading(true);
        loader.set_loading(false);
        loader.on_visibility(true);

        assert_eq!(rx.try_recv().unwrap(), LoadMoreRequest { seq: 1 });
        assert_eq!(rx.try_recv().unwrap(), LoadMoreRequest { seq: 2 });
        assert!(rx.try_recv().is_err());
        assert_eq!(loader.fired(), 2);
    }

    #[test]
    fn test_channel_sink_tolerates_dropped_receiver() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let mut loader = ViewportLoader::new(tx);
        assert!(loader.on_visibility(true));
    }
}
