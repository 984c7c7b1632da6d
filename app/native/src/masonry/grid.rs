//! Masonry grid controller.
//!
//! Ties the pieces of this module together for one feed: the last computed
//! layout, the viewport loader and the resize coalescer. The controller
//! reads the feed through [`FeedView`] and recomputes the layout only when
//! the list revision or the container width changes.

use std::time::Instant;

use super::engine::{ColumnHeights, compute_layout};
use super::geometry::GridGeometry;
use super::host::{Subscription, ViewportEvent, ViewportHost};
use super::item::{Tile, TileFrame};
use super::loader::{Footer, LoadSink, ViewportLoader};
use super::resize::ResizeCoalescer;
use crate::error::PinboardError;
use crate::feed::FeedView;

/// Owned layout state plus the loader for one feed.
pub struct MasonryGrid<Id, S> {
    geometry: GridGeometry,
    width: u32,
    coalescer: ResizeCoalescer,
    loader: ViewportLoader<S>,
    subscription: Option<Subscription>,
    frames: Vec<TileFrame<Id>>,
    column_heights: ColumnHeights,
    total_height: u32,
    content_width: u32,
    revision: Option<u64>,
    generation: Option<u64>,
}

impl<Id: Clone, S: LoadSink> MasonryGrid<Id, S> {
    /// Creates a grid for a container of `width` pixels.
    ///
    /// No layout exists until the first [`sync`](Self::sync).
    pub fn new(geometry: GridGeometry, width: u32, coalesce_ms: u64, sink: S) -> Self {
        let mut coalescer = ResizeCoalescer::new(coalesce_ms);
        coalescer.offer(width);

        Self {
            geometry,
            width,
            coalescer,
            loader: ViewportLoader::new(sink),
            subscription: None,
            frames: Vec::new(),
            column_heights: ColumnHeights::new(),
            total_height: 0,
            content_width: 0,
            revision: None,
            generation: None,
        }
    }

    /// Subscribes to viewport notifications from `host`.
    ///
    /// # Errors
    ///
    /// Returns [`PinboardError::ObservationUnavailable`] when the host
    /// cannot observe visibility. The grid stays usable through
    /// [`request_manual`](Self::request_manual).
    pub fn attach(&mut self, host: &impl ViewportHost) -> Result<(), PinboardError> {
        match host.subscribe() {
            Ok(subscription) => {
                self.subscription = Some(subscription);
                tracing::debug!("masonry: attached to viewport host");
                Ok(())
            }
            Err(err) => {
                tracing::warn!("masonry: {err}, falling back to manual loading");
                Err(err.into())
            }
        }
    }

    /// Releases the host subscription.
    pub fn detach(&mut self) { self.subscription = None; }

    /// Whether a host subscription is held.
    #[must_use]
    pub const fn is_attached(&self) -> bool { self.subscription.is_some() }

    /// Waits for the next host notification.
    ///
    /// Returns `None` when detached or when the host went away.
    pub async fn next_event(&mut self) -> Option<ViewportEvent> {
        match self.subscription.as_mut() {
            Some(subscription) => subscription.recv().await,
            None => None,
        }
    }

    /// Handles every notification already queued by the host, then applies
    /// a parked resize whose window has elapsed.
    ///
    /// Returns the number of load-more signals fired.
    pub fn pump<V>(&mut self, view: &V) -> usize
    where
        V: FeedView,
        V::Item: Tile<Id = Id>,
    {
        let events = self.subscription.as_mut().map(Subscription::drain).unwrap_or_default();
        let fired = events.into_iter().filter(|&event| self.handle_event(event, view)).count();
        self.poll_resize(Instant::now(), view);
        fired
    }

    /// Applies one host notification. Returns `true` if a load fired.
    pub fn handle_event<V>(&mut self, event: ViewportEvent, view: &V) -> bool
    where
        V: FeedView,
        V::Item: Tile<Id = Id>,
    {
        match event {
            ViewportEvent::Visibility(visible) => {
                self.sync(view);
                self.loader.on_visibility(visible)
            }
            ViewportEvent::Resize(width) => {
                if let Some(width) = self.coalescer.offer(width) {
                    self.apply_width(width, view);
                }
                false
            }
        }
    }

    /// Pulls the feed's flags into the loader and relayouts on list change.
    ///
    /// Returns `true` if the layout was recomputed.
    pub fn sync<V>(&mut self, view: &V) -> bool
    where
        V: FeedView,
        V::Item: Tile<Id = Id>,
    {
        if self.generation.is_some_and(|g| g != view.generation()) {
            tracing::debug!(generation = view.generation(), "masonry: list reset");
            self.loader.reset();
        }
        self.generation = Some(view.generation());
        self.loader.set_flags(view.has_more(), view.is_loading());

        if self.revision == Some(view.revision()) {
            return false;
        }
        self.relayout(view);
        true
    }

    /// Treats the current list as a replacement of the previous one.
    pub fn reset_list<V>(&mut self, view: &V)
    where
        V: FeedView,
        V::Item: Tile<Id = Id>,
    {
        self.loader.reset();
        self.generation = Some(view.generation());
        self.loader.set_flags(view.has_more(), view.is_loading());
        self.relayout(view);
    }

    /// Swaps the geometry; applies to the next computation, run right away.
    pub fn set_geometry<V>(&mut self, geometry: GridGeometry, view: &V)
    where
        V: FeedView,
        V::Item: Tile<Id = Id>,
    {
        if self.geometry != geometry {
            self.geometry = geometry;
            self.relayout(view);
        }
    }

    /// Applies a parked resize whose window has elapsed.
    pub fn poll_resize<V>(&mut self, now: Instant, view: &V) -> bool
    where
        V: FeedView,
        V::Item: Tile<Id = Id>,
    {
        self.coalescer.poll_at(now).map(|width| self.apply_width(width, view)).is_some()
    }

    /// Applies a parked resize immediately.
    pub fn flush_resize<V>(&mut self, view: &V) -> bool
    where
        V: FeedView,
        V::Item: Tile<Id = Id>,
    {
        self.coalescer.flush().map(|width| self.apply_width(width, view)).is_some()
    }

    /// When a parked resize becomes due.
    #[must_use]
    pub fn resize_deadline(&self) -> Option<Instant> { self.coalescer.deadline() }

    /// Manual "load more" for hosts without visibility observation.
    pub fn request_manual<V>(&mut self, view: &V) -> bool
    where
        V: FeedView,
        V::Item: Tile<Id = Id>,
    {
        self.sync(view);
        self.loader.request_manual()
    }

    /// Terminal indicator for the renderer.
    #[must_use]
    pub fn footer(&self) -> Footer { self.loader.footer(self.frames.len()) }

    /// Frames of the last layout, in item order.
    #[must_use]
    pub fn frames(&self) -> &[TileFrame<Id>] { &self.frames }

    /// Column heights of the last layout.
    #[must_use]
    pub fn column_heights(&self) -> &[u32] { &self.column_heights }

    /// Number of columns of the last layout.
    #[must_use]
    pub fn column_count(&self) -> usize { self.column_heights.len() }

    /// Height of the scroll content.
    #[must_use]
    pub const fn total_height(&self) -> u32 { self.total_height }

    /// Width of the centred grid content.
    #[must_use]
    pub const fn content_width(&self) -> u32 { self.content_width }

    /// Container width of the last layout.
    #[must_use]
    pub const fn width(&self) -> u32 { self.width }

    /// Current geometry.
    #[must_use]
    pub const fn geometry(&self) -> &GridGeometry { &self.geometry }

    /// The loader.
    #[must_use]
    pub const fn loader(&self) -> &ViewportLoader<S> { &self.loader }

    fn apply_width<V>(&mut self, width: u32, view: &V)
    where
        V: FeedView,
        V::Item: Tile<Id = Id>,
    {
        tracing::trace!(from = self.width, to = width, "masonry: container resized");
        self.width = width;
        self.relayout(view);
    }

    fn relayout<V>(&mut self, view: &V)
    where
        V: FeedView,
        V::Item: Tile<Id = Id>,
    {
        let layout = compute_layout(view.items(), self.width, &self.geometry);

        self.frames = layout.frames();
        self.column_heights = layout.column_heights().iter().copied().collect();
        self.total_height = layout.total_height();
        self.content_width = layout.content_width();
        self.revision = Some(view.revision());

        tracing::trace!(
            items = self.frames.len(),
            columns = self.column_heights.len(),
            height = self.total_height,
            "masonry: relayout"
        );
    }
}

// ============================================================================
// Tests
// ============================================================================
