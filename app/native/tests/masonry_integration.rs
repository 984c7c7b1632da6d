//! Integration tests for the masonry grid and the paginated feed.
//!
//! These tests only use the public API of `pinboard_lib`: the pure layout
//! function, a grid driven by a channel host over an observable feed, and a
//! full feed session running on a tokio runtime.
//!
//! ```bash
//! cargo test -p pinboard --test masonry_integration
//! ```

use pinboard_lib::config::PinboardConfig;
use pinboard_lib::feed::{FeedSession, FeedStore, FeedView, ObservableFeed, Pin, PlaceholderSource};
use pinboard_lib::masonry::{
    ChannelHost, Footer, GridGeometry, LoadMoreRequest, MasonryGrid, ViewportEvent, ViewportHost,
    compute_layout,
};
use tokio::sync::mpsc;

// ============================================================================
// Helpers
// ============================================================================

fn pin(id: &str, width: i64, height: i64) -> Pin {
    let mut pin = Pin::new(format!("https://img.example/{id}.jpg"), width, height, "u1");
    pin.id = id.to_string();
    pin
}

fn page(prefix: &str, count: usize) -> Vec<Pin> {
    (0..count).map(|i| pin(&format!("{prefix}-{i}"), 400, 300)).collect()
}

type ChannelGrid = MasonryGrid<String, mpsc::UnboundedSender<LoadMoreRequest>>;

fn attached_grid(width: u32) -> (ChannelGrid, ChannelHost, mpsc::UnboundedReceiver<LoadMoreRequest>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut grid = MasonryGrid::new(GridGeometry::default(), width, 0, tx);
    let host = ChannelHost::new();
    grid.attach(&host).unwrap();
    (grid, host, rx)
}

fn drain(rx: &mut mpsc::UnboundedReceiver<LoadMoreRequest>) -> usize {
    let mut count = 0;
    while rx.try_recv().is_ok() {
        count += 1;
    }
    count
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn test_layout_places_into_shortest_column() {
    let pins = vec![pin("a", 280, 280), pin("b", 280, 560), pin("c", 280, 140), pin("d", 280, 280)];
    let layout = compute_layout(&pins, 904, &GridGeometry::default());

    assert_eq!(layout.column_count(), 3);
    let frames = layout.frames();
    let placed: Vec<(&str, usize, u32, u32)> =
        frames.iter().map(|f| (f.id.as_str(), f.column, f.top, f.height)).collect();

    assert_eq!(
        placed,
        vec![("a", 0, 0, 400), ("b", 1, 0, 680), ("c", 2, 0, 260), ("d", 2, 276, 400)]
    );
    assert_eq!(layout.column_heights(), &[416, 696, 692]);
    assert_eq!(layout.total_height(), 696);
}

#[test]
fn test_layout_column_count_follows_width() {
    let geometry = GridGeometry::default();
    let pins = page("p", 4);

    assert_eq!(compute_layout(&pins, 900, &geometry).column_count(), 2);
    assert_eq!(compute_layout(&pins, 904, &geometry).column_count(), 3);
    assert_eq!(compute_layout(&pins, 1200, &geometry).column_count(), 4);
    assert_eq!(compute_layout(&pins, 0, &geometry).column_count(), 1);
}

#[test]
fn test_layout_of_empty_list() {
    let pins: Vec<Pin> = Vec::new();
    let layout = compute_layout(&pins, 904, &GridGeometry::default());

    assert!(layout.is_empty());
    assert_eq!(layout.column_count(), 3);
    assert_eq!(layout.total_height(), 0);
}

#[test]
fn test_layout_treats_degenerate_dimensions_as_square() {
    let pins = vec![pin("zero", 0, 500), pin("negative", -10, 200)];
    let layout = compute_layout(&pins, 600, &GridGeometry::default());

    assert!(layout.frames().iter().all(|f| f.height == 400));
}

// ============================================================================
// Grid + host + feed
// ============================================================================

#[test]
fn test_grid_loads_on_visibility_and_stops_when_exhausted() {
    let mut feed = ObservableFeed::new();
    feed.append_items(page("1", 20));
    let (mut grid, host, mut rx) = attached_grid(904);
    grid.sync(&feed);
    assert_eq!(grid.frames().len(), 20);

    // Sentinel scrolls into view
    host.emit(ViewportEvent::Visibility(true));
    assert_eq!(grid.pump(&feed), 1);
    assert_eq!(drain(&mut rx), 1);

    // A page is in flight: repeated reports do nothing
    feed.begin_fetch();
    host.emit(ViewportEvent::Visibility(true));
    assert_eq!(grid.pump(&feed), 0);
    assert_eq!(grid.footer(), Footer::Loading);

    // The page lands; still visible, so the next report pulls again
    feed.complete_fetch(page("2", 20));
    host.emit(ViewportEvent::Visibility(true));
    assert_eq!(grid.pump(&feed), 1);
    assert_eq!(grid.frames().len(), 40);

    // The source runs dry
    feed.begin_fetch();
    grid.sync(&feed);
    feed.complete_fetch(Vec::new());
    host.emit(ViewportEvent::Visibility(false));
    host.emit(ViewportEvent::Visibility(true));
    assert_eq!(grid.pump(&feed), 0);
    assert_eq!(grid.footer(), Footer::EndOfContent);
    assert_eq!(drain(&mut rx), 1);
}

#[test]
fn test_grid_reset_requires_fresh_transition() {
    let mut feed = ObservableFeed::new();
    feed.append_items(page("1", 5));
    feed.begin_fetch();
    feed.complete_fetch(Vec::new());
    let (mut grid, host, mut rx) = attached_grid(904);
    grid.sync(&feed);
    host.emit(ViewportEvent::Visibility(true));
    assert_eq!(grid.pump(&feed), 0);

    feed.reset();
    feed.append_items(page("r", 5));
    grid.sync(&feed);
    assert_eq!(grid.footer(), Footer::Idle);

    // Still visible, but no new transition yet
    host.emit(ViewportEvent::Visibility(true));
    assert_eq!(grid.pump(&feed), 0);

    host.emit(ViewportEvent::Visibility(false));
    host.emit(ViewportEvent::Visibility(true));
    assert_eq!(grid.pump(&feed), 1);
    assert_eq!(drain(&mut rx), 1);
}

#[test]
fn test_grid_resize_relayouts() {
    let mut feed = ObservableFeed::new();
    feed.append_items(page("1", 6));
    let (mut grid, host, _rx) = attached_grid(904);
    grid.sync(&feed);
    assert_eq!(grid.column_count(), 3);

    host.emit(ViewportEvent::Resize(1200));
    grid.pump(&feed);

    assert_eq!(grid.width(), 1200);
    assert_eq!(grid.column_count(), 4);
    assert_eq!(grid.frames().len(), 6);
}

#[test]
fn test_unsupported_host_falls_back_to_manual_loading() {
    let feed = {
        let mut feed = ObservableFeed::new();
        feed.append_items(page("1", 3));
        feed
    };
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut grid: ChannelGrid = MasonryGrid::new(GridGeometry::default(), 904, 0, tx);

    let host = ChannelHost::unsupported();
    assert!(host.subscribe().is_err());
    assert!(grid.attach(&host).is_err());
    assert!(!grid.is_attached());

    assert!(grid.request_manual(&feed));
    assert_eq!(drain(&mut rx), 1);
}

// ============================================================================
// Session
// ============================================================================

#[tokio::test]
async fn test_session_pages_until_source_runs_out() {
    let source = PlaceholderSource::new(11).with_max_pages(Some(2));
    let mut session = FeedSession::new(source, &PinboardConfig::default(), 904);
    let host = ChannelHost::new();
    session.attach(&host).unwrap();

    // Page 1 is fetched up front; two reports pull page 2 and the empty page 3
    for _ in 0..4 {
        host.emit(ViewportEvent::Visibility(true));
    }
    drop(host);

    let stats = session.run().await;
    let snapshot = session.snapshot();

    assert_eq!(stats.signals, 2);
    assert_eq!(stats.pages, 3);
    assert_eq!(stats.failures, 0);
    assert_eq!(snapshot.frames.len(), 40);
    assert_eq!(snapshot.footer, Footer::EndOfContent);
    assert_eq!(session.feed().len(), 40);
    assert!(!session.feed().has_more());
}
