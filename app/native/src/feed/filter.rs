//! Search and topic filtering of a pin feed.

use super::pin::Pin;
use super::store::FeedView;

/// Case-insensitive search query plus an optional topic.
///
/// A pin passes when the query matches its title or description and the
/// topic matches its title or description too. An empty query or topic
/// matches everything.
#[derive(Debug, Clone, Default)]
pub struct PinFilter {
    query: String,
    topic: Option<String>,
    generation: u64,
}

impl PinFilter {
    /// A filter that matches every pin.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Replaces the search query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into().to_lowercase();
        if query != self.query {
            self.query = query;
            self.generation += 1;
        }
    }

    /// Selects a topic, or clears it with `None`.
    pub fn set_topic(&mut self, topic: Option<&str>) {
        let topic = topic.map(str::to_lowercase);
        if topic != self.topic {
            self.topic = topic;
            self.generation += 1;
        }
    }

    /// The lower-cased search query.
    #[must_use]
    pub fn query(&self) -> &str { &self.query }

    /// The lower-cased topic.
    #[must_use]
    pub fn topic(&self) -> Option<&str> { self.topic.as_deref() }

    /// Bumped on every effective change.
    #[must_use]
    pub const fn generation(&self) -> u64 { self.generation }

    /// Whether `pin` passes the filter.
    #[must_use]
    pub fn matches(&self, pin: &Pin) -> bool {
        matches_text(pin, &self.query) && self.topic.as_deref().is_none_or(|topic| matches_text(pin, topic))
    }

    /// View of `view` restricted to matching pins.
    #[must_use]
    pub const fn apply<'a, V>(&'a self, view: &'a V) -> Filtered<'a, V> { Filtered { view, filter: self } }
}

fn matches_text(pin: &Pin, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let contains = |text: &Option<String>| text.as_deref().is_some_and(|t| t.to_lowercase().contains(needle));
    contains(&pin.title) || contains(&pin.description)
}

/// A feed restricted to the pins matching a [`PinFilter`].
///
/// A filter change counts as a list replacement.
pub struct Filtered<'a, V> {
    view: &'a V,
    filter: &'a PinFilter,
}

impl<V: FeedView<Item = Pin>> FeedView for Filtered<'_, V> {
    type Item = Pin;

    fn items(&self) -> impl Iterator<Item = &Pin> {
        self.view.items().filter(|pin| self.filter.matches(pin))
    }

    fn len(&self) -> usize { self.items().count() }

    fn is_loading(&self) -> bool { self.view.is_loading() }

    fn has_more(&self) -> bool { self.view.has_more() }

    fn revision(&self) -> u64 { self.view.revision().wrapping_add(self.filter.generation) }

    fn generation(&self) -> u64 { self.view.generation().wrapping_add(self.filter.generation) }
}
