//! Feed state: the item list plus its pagination flags.
//!
//! The grid only ever reads the feed through [`FeedView`]; whoever fetches
//! pages writes through [`FeedStore`]. [`ObservableFeed`] is the in-memory
//! implementation, built on `eyeball` observables so renderers can
//! subscribe to changes.

use eyeball::Observable;
use eyeball_im::{ObservableVector, VectorSubscriber};

use super::pin::Pin;
use crate::constants::feed::FIRST_PAGE;
use crate::masonry::Tile;

// ============================================================================
// Traits
// ============================================================================

/// Read side of a feed.
pub trait FeedView {
    /// Item type laid out by the grid.
    type Item: Tile;

    /// Items in display order.
    fn items(&self) -> impl Iterator<Item = &Self::Item>;

    /// Number of items.
    fn len(&self) -> usize;

    /// Whether the feed holds no items.
    fn is_empty(&self) -> bool { self.len() == 0 }

    /// Whether a page is in flight.
    fn is_loading(&self) -> bool;

    /// Whether more pages may exist.
    fn has_more(&self) -> bool;

    /// Bumped on every change to the item list.
    fn revision(&self) -> u64;

    /// Bumped when the list is replaced rather than extended.
    fn generation(&self) -> u64;
}

/// Write side of a feed.
pub trait FeedStore: FeedView {
    /// Appends a page of items.
    fn append_items(&mut self, items: Vec<Self::Item>);

    /// Sets the `loading` flag.
    fn set_loading(&mut self, loading: bool);

    /// Sets the `has_more` flag.
    fn set_has_more(&mut self, has_more: bool);

    /// Clears the list and restores the initial pagination state.
    fn reset(&mut self);
}

// ============================================================================
// ObservableFeed
// ============================================================================

/// In-memory pin feed with observable state.
pub struct ObservableFeed {
    pins: ObservableVector<Pin>,
    loading: Observable<bool>,
    has_more: Observable<bool>,
    error: Option<String>,
    page: u32,
    revision: u64,
    generation: u64,
}

impl Default for ObservableFeed {
    fn default() -> Self { Self::new() }
}

impl ObservableFeed {
    /// Creates an empty feed positioned on the first page.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pins: ObservableVector::new(),
            loading: Observable::new(false),
            has_more: Observable::new(true),
            error: None,
            page: FIRST_PAGE,
            revision: 0,
            generation: 0,
        }
    }

    /// The next page to fetch.
    #[must_use]
    pub const fn page(&self) -> u32 { self.page }

    /// Message of the last failed fetch, cleared when a new one starts.
    #[must_use]
    pub fn error(&self) -> Option<&str> { self.error.as_deref() }

    /// The page to fetch next, if fetching is allowed right now.
    #[must_use]
    pub fn next_request(&self) -> Option<u32> {
        (!self.is_loading() && self.has_more()).then_some(self.page)
    }

    /// Marks a fetch as started.
    pub fn begin_fetch(&mut self) {
        Observable::set(&mut self.loading, true);
        self.error = None;
    }

    /// Applies a fetched page.
    ///
    /// An empty page means the feed is exhausted; otherwise the pins are
    /// appended and the page counter advances.
    pub fn complete_fetch(&mut self, pins: Vec<Pin>) {
        Observable::set(&mut self.loading, false);
        if pins.is_empty() {
            tracing::debug!(page = self.page, "feed: empty page, no more content");
            Observable::set(&mut self.has_more, false);
        } else {
            tracing::debug!(page = self.page, count = pins.len(), "feed: page loaded");
            self.append_items(pins);
            self.page += 1;
        }
    }

    /// Records a failed fetch. `has_more` and the page counter are untouched.
    pub fn fail_fetch(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(page = self.page, "feed: fetch failed: {message}");
        Observable::set(&mut self.loading, false);
        self.error = Some(message);
    }

    /// Prepends a pin the user just created.
    pub fn add_pin(&mut self, pin: Pin) {
        self.pins.push_front(pin);
        self.revision += 1;
    }

    /// Removes a pin by id.
    pub fn remove_pin(&mut self, id: &str) -> Option<Pin> {
        let index = self.pins.iter().position(|pin| pin.id == id)?;
        self.revision += 1;
        Some(self.pins.remove(index))
    }

    /// Looks up a pin by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Pin> { self.pins.iter().find(|pin| pin.id == id) }

    /// Subscribes to item list changes.
    #[must_use]
    pub fn subscribe_pins(&self) -> VectorSubscriber<Pin> { self.pins.subscribe() }

    /// Subscribes to the `loading` flag.
    #[must_use]
    pub fn subscribe_loading(&self) -> eyeball::Subscriber<bool> {
        Observable::subscribe(&self.loading)
    }
}

impl FeedView for ObservableFeed {
    type Item = Pin;

    fn items(&self) -> impl Iterator<Item = &Pin> { self.pins.iter() }

    fn len(&self) -> usize { self.pins.len() }

    fn is_loading(&self) -> bool { *Observable::get(&self.loading) }

    fn has_more(&self) -> bool { *Observable::get(&self.has_more) }

    fn revision(&self) -> u64 { self.revision }

    fn generation(&self) -> u64 { self.generation }
}

impl FeedStore for ObservableFeed {
    fn append_items(&mut self, items: Vec<Pin>) {
        if items.is_empty() {
            return;
        }
        for pin in items {
            self.pins.push_back(pin);
        }
        self.revision += 1;
    }

    fn set_loading(&mut self, loading: bool) { Observable::set(&mut self.loading, loading); }

    fn set_has_more(&mut self, has_more: bool) { Observable::set(&mut self.has_more, has_more); }

    fn reset(&mut self) {
        self.pins.clear();
        self.page = FIRST_PAGE;
        Observable::set(&mut self.has_more, true);
        Observable::set(&mut self.loading, false);
        self.error = None;
        self.revision += 1;
        self.generation += 1;
        tracing::debug!(generation = self.generation, "feed: reset");
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pin(id: &str) -> Pin {
        let mut pin = Pin::new("https://img/x.jpg", 300, 400, "u1");
        pin.id = id.to_string();
        pin
    }

    fn ids(feed: &ObservableFeed) -> Vec<&str> { feed.items().map(|p| p.id.as_str()).collect() }

    #[test]
    fn test_new_feed_state() {
        let feed = ObservableFeed::new();
        assert!(feed.is_empty());
        assert!(!feed.is_loading());
        assert!(feed.has_more());
        assert_eq!(feed.page(), 1);
        assert_eq!(feed.next_request(), Some(1));
    }

    // ========================================================================
    // Fetch lifecycle
    // ========================================================================

    #[test]
    fn test_begin_fetch_sets_loading_and_clears_error() {
        let mut feed = ObservableFeed::new();
        feed.fail_fetch("boom");
        feed.begin_fetch();
        assert!(feed.is_loading());
        assert_eq!(feed.error(), None);
        assert_eq!(feed.next_request(), None);
    }

    #[test]
    fn test_complete_fetch_appends_and_advances() {
        let mut feed = ObservableFeed::new();
        feed.begin_fetch();
        feed.complete_fetch(vec![pin("a"), pin("b")]);

        assert!(!feed.is_loading());
        assert_eq!(ids(&feed), ["a", "b"]);
        assert_eq!(feed.page(), 2);
        assert_eq!(feed.revision(), 1);
    }

    #[test]
    fn test_empty_page_exhausts() {
        let mut feed = ObservableFeed::new();
        feed.begin_fetch();
        feed.complete_fetch(Vec::new());

        assert!(!feed.has_more());
        assert_eq!(feed.page(), 1);
        assert_eq!(feed.revision(), 0);
        assert_eq!(feed.next_request(), None);
    }

    #[test]
    fn test_fail_fetch_keeps_has_more() {
        let mut feed = ObservableFeed::new();
        feed.begin_fetch();
        feed.fail_fetch("Failed to fetch pins");

        assert!(!feed.is_loading());
        assert!(feed.has_more());
        assert_eq!(feed.error(), Some("Failed to fetch pins"));
        assert_eq!(feed.next_request(), Some(1));
    }

    // ========================================================================
    // List edits
    // ========================================================================

    #[test]
    fn test_add_pin_prepends() {
        let mut feed = ObservableFeed::new();
        feed.append_items(vec![pin("a")]);
        feed.add_pin(pin("new"));
        assert_eq!(ids(&feed), ["new", "a"]);
    }

    #[test]
    fn test_remove_pin() {
        let mut feed = ObservableFeed::new();
        feed.append_items(vec![pin("a"), pin("b"), pin("c")]);
        let revision = feed.revision();

        assert_eq!(feed.remove_pin("b").map(|p| p.id), Some("b".to_string()));
        assert_eq!(ids(&feed), ["a", "c"]);
        assert!(feed.revision() > revision);

        assert!(feed.remove_pin("missing").is_none());
    }

    #[test]
    fn test_reset_restores_initial_pagination() {
        let mut feed = ObservableFeed::new();
        feed.complete_fetch(vec![pin("a")]);
        feed.set_has_more(false);

        feed.reset();
        assert!(feed.is_empty());
        assert!(feed.has_more());
        assert_eq!(feed.page(), 1);
        assert_eq!(feed.generation(), 1);
    }

    #[test]
    fn test_reset_clears_loading_and_error() {
        let mut feed = ObservableFeed::new();
        feed.begin_fetch();
        feed.fail_fetch("Failed to fetch pins");
        feed.begin_fetch();

        feed.reset();
        assert!(!feed.is_loading());
        assert_eq!(feed.error(), None);
        assert_eq!(feed.next_request(), Some(1));
    }

    #[test]
    fn test_append_empty_is_not_a_change() {
        let mut feed = ObservableFeed::new();
        feed.append_items(Vec::new());
        assert_eq!(feed.revision(), 0);
    }

    #[test]
    fn test_loading_subscriber_sees_updates() {
        let mut feed = ObservableFeed::new();
        let subscriber = feed.subscribe_loading();
        feed.begin_fetch();
        assert!(subscriber.get());
    }
}
