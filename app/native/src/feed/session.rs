//! Feed session: one grid wired to one feed and one page source.
//!
//! The session owns the loop that turns host notifications into layouts and
//! load-more signals into fetched pages:
//!
//! ```text
//!  host ──ViewportEvent──▶ MasonryGrid ──LoadMoreRequest──▶ session
//!                              ▲                               │
//!                              └──── sync ◀── ObservableFeed ◀─┘ fetch_page
//! ```
//!
//! Each processed event publishes a [`GridSnapshot`] that renderers can
//! subscribe to.

use std::time::Instant;

use eyeball::{SharedObservable, Subscriber};
use serde::Serialize;
use tokio::sync::mpsc;

use super::pin::Pin;
use super::source::PageSource;
use super::store::{FeedStore, FeedView, ObservableFeed};
use crate::config::PinboardConfig;
use crate::error::PinboardError;
use crate::masonry::{
    Footer, GridGeometry, LoadMoreRequest, MasonryGrid, TileFrame, ViewportEvent, ViewportHost,
};

/// Renderer-facing state after an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSnapshot {
    pub frames: Vec<TileFrame<String>>,
    pub column_count: usize,
    pub total_height: u32,
    pub content_width: u32,
    pub width: u32,
    pub footer: Footer,
    pub page: u32,
    pub error: Option<String>,
}

/// Counters collected over a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    /// Load-more signals received.
    pub signals: u64,
    /// Pages fetched successfully, empty pages included.
    pub pages: u64,
    /// Failed fetches.
    pub failures: u64,
}

type Grid = MasonryGrid<String, mpsc::UnboundedSender<LoadMoreRequest>>;

/// A grid, its feed and the page source feeding it.
pub struct FeedSession<P> {
    feed: ObservableFeed,
    source: P,
    page_size: usize,
    grid: Grid,
    requests: mpsc::UnboundedReceiver<LoadMoreRequest>,
    snapshot: SharedObservable<GridSnapshot>,
    stats: SessionStats,
}

impl<P: PageSource> FeedSession<P> {
    /// Creates a session for a container `width` pixels wide.
    pub fn new(source: P, config: &PinboardConfig, width: u32) -> Self {
        let (tx, requests) = mpsc::unbounded_channel();
        let geometry = GridGeometry::from_config(&config.grid);
        let grid = MasonryGrid::new(geometry, width, config.feed.resize_coalesce_ms, tx);

        let mut session = Self {
            feed: ObservableFeed::new(),
            source,
            page_size: config.feed.page_size,
            grid,
            requests,
            snapshot: SharedObservable::new(empty_snapshot(width)),
            stats: SessionStats::default(),
        };
        session.grid.sync(&session.feed);
        session.publish();
        session
    }

    /// Subscribes the session's grid to `host`.
    ///
    /// # Errors
    ///
    /// Returns [`PinboardError::ObservationUnavailable`] when the host
    /// cannot observe visibility; use [`load_more_manual`](Self::load_more_manual).
    pub fn attach(&mut self, host: &impl ViewportHost) -> Result<(), PinboardError> {
        self.grid.attach(host)
    }

    /// Subscribes to published snapshots.
    #[must_use]
    pub fn subscribe(&self) -> Subscriber<GridSnapshot> { self.snapshot.subscribe() }

    /// The latest snapshot.
    #[must_use]
    pub fn snapshot(&self) -> GridSnapshot { self.snapshot.get() }

    /// The feed.
    #[must_use]
    pub const fn feed(&self) -> &ObservableFeed { &self.feed }

    /// The grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid { &self.grid }

    /// Counters so far.
    #[must_use]
    pub const fn stats(&self) -> SessionStats { self.stats }

    /// Processes host notifications until the host goes away.
    ///
    /// Fetches the first page up front when the feed is empty.
    pub async fn run(&mut self) -> SessionStats {
        if self.feed.is_empty() {
            self.fetch_next().await;
        }

        loop {
            let deadline = self.grid.resize_deadline();

            tokio::select! {
                biased;

                Some(request) = self.requests.recv() => {
                    self.stats.signals += 1;
                    tracing::debug!(seq = request.seq, "feed: load more requested");
                    self.fetch_next().await;
                }
                event = self.grid.next_event() => {
                    let Some(event) = event else { break };
                    self.handle_event(event);
                }
                () = sleep_until(deadline), if deadline.is_some() => {
                    if self.grid.poll_resize(Instant::now(), &self.feed) {
                        self.publish();
                    }
                }
            }
        }

        if self.grid.flush_resize(&self.feed) {
            self.publish();
        }
        tracing::debug!(stats = ?self.stats, "feed: session ended");
        self.stats
    }

    /// Applies one host notification.
    pub fn handle_event(&mut self, event: ViewportEvent) {
        self.grid.handle_event(event, &self.feed);
        self.publish();
    }

    /// Manual "load more" for hosts without visibility observation.
    ///
    /// Returns `true` if a page was requested.
    pub async fn load_more_manual(&mut self) -> bool {
        if !self.grid.request_manual(&self.feed) {
            return false;
        }
        while let Ok(request) = self.requests.try_recv() {
            self.stats.signals += 1;
            tracing::debug!(seq = request.seq, "feed: manual load more");
            self.fetch_next().await;
        }
        true
    }

    /// Prepends a pin the user just created.
    pub fn add_pin(&mut self, pin: Pin) {
        self.feed.add_pin(pin);
        self.grid.sync(&self.feed);
        self.publish();
    }

    /// Replaces the feed with an empty one; the next page is page 1.
    pub fn reset(&mut self) {
        self.feed.reset();
        self.grid.sync(&self.feed);
        self.publish();
    }

    /// Applies new geometry to the next layout.
    pub fn set_geometry(&mut self, geometry: GridGeometry) {
        self.grid.set_geometry(geometry, &self.feed);
        self.publish();
    }

    async fn fetch_next(&mut self) {
        let Some(page) = self.feed.next_request() else {
            tracing::trace!("feed: fetch skipped, busy or exhausted");
            return;
        };

        self.feed.begin_fetch();
        self.grid.sync(&self.feed);

        match self.source.fetch_page(page, self.page_size).await {
            Ok(pins) => {
                self.stats.pages += 1;
                self.feed.complete_fetch(pins);
            }
            Err(err) => {
                self.stats.failures += 1;
                self.feed.fail_fetch(err.to_string());
            }
        }

        self.grid.sync(&self.feed);
        self.publish();
    }

    fn publish(&self) {
        self.snapshot.set(GridSnapshot {
            frames: self.grid.frames().to_vec(),
            column_count: self.grid.column_count(),
            total_height: self.grid.total_height(),
            content_width: self.grid.content_width(),
            width: self.grid.width(),
            footer: self.grid.footer(),
            page: self.feed.page(),
            error: self.feed.error().map(str::to_string),
        });
    }
}

fn empty_snapshot(width: u32) -> GridSnapshot {
    GridSnapshot {
        frames: Vec::new(),
        column_count: 1,
        total_height: 0,
        content_width: 0,
        width,
        footer: Footer::Idle,
        page: 1,
        error: None,
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}

// ============================================================================
// Tests
// ============================================================================
