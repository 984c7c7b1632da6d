//! Page sources.
//!
//! A [`PageSource`] produces one page of pins at a time. The built-in
//! [`PlaceholderSource`] generates deterministic placeholder pins; it is also
//! what [`WithFallback`] falls back to when a real photo API fails.

use std::future::Future;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::FeedError;
use super::pin::{Pin, PinAuthor, now_millis};
use crate::constants::feed::{
    PLACEHOLDER_HEIGHT_SPAN, PLACEHOLDER_MIN_HEIGHT, PLACEHOLDER_MIN_WIDTH, PLACEHOLDER_WIDTH_SPAN,
};

/// A source of feed pages.
pub trait PageSource {
    /// Fetches `page` (1-based) with at most `limit` pins.
    ///
    /// An empty page means there is no more content.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError`] when the page cannot be produced.
    fn fetch_page(
        &mut self,
        page: u32,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Pin>, FeedError>> + Send;
}

// ============================================================================
// PlaceholderSource
// ============================================================================

/// Generates placeholder pins with random dimensions.
///
/// Dimensions fall in `300..500 × 200..600`. Each page is seeded from the
/// source seed and the page number, so a page always has the same content
/// regardless of fetch order.
#[derive(Debug, Clone)]
pub struct PlaceholderSource {
    seed: u64,
    max_pages: Option<u32>,
    fail_page: Option<u32>,
}

impl PlaceholderSource {
    /// Unlimited placeholder pages.
    #[must_use]
    pub const fn new(seed: u64) -> Self { Self { seed, max_pages: None, fail_page: None } }

    /// Stops producing pins after `max_pages` pages.
    #[must_use]
    pub const fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Fails every fetch of `page`.
    #[must_use]
    pub const fn with_failing_page(mut self, page: Option<u32>) -> Self {
        self.fail_page = page;
        self
    }

    /// Builds the pins of `page` without going through the async interface.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Source`] for the configured failing page.
    pub fn generate(&self, page: u32, limit: usize) -> Result<Vec<Pin>, FeedError> {
        if self.fail_page == Some(page) {
            return Err(FeedError::Source(format!("placeholder page {page} unavailable")));
        }
        if self.max_pages.is_some_and(|max| page > max) {
            return Ok(Vec::new());
        }

        let mut rng = StdRng::seed_from_u64(self.seed ^ u64::from(page).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        let created_at = now_millis();

        Ok((0..limit)
            .map(|index| {
                let width = PLACEHOLDER_MIN_WIDTH + rng.random_range(0..PLACEHOLDER_WIDTH_SPAN);
                let height = PLACEHOLDER_MIN_HEIGHT + rng.random_range(0..PLACEHOLDER_HEIGHT_SPAN);
                placeholder_pin(&format!("{page}-{index}"), width, height, created_at)
            })
            .collect())
    }
}

impl PageSource for PlaceholderSource {
    fn fetch_page(
        &mut self,
        page: u32,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Pin>, FeedError>> + Send {
        std::future::ready(self.generate(page, limit))
    }
}

fn placeholder_pin(id: &str, width: i64, height: i64, created_at: u64) -> Pin {
    Pin {
        id: id.to_string(),
        title: Some(format!("Placeholder Image {id}")),
        description: Some("A randomly generated placeholder image".to_string()),
        image_url: format!("https://source.unsplash.com/random/{width}x{height}?sig={id}"),
        source_url: None,
        alt_text: Some(format!("Placeholder image {id}")),
        width,
        height,
        user_id: "demo-user".to_string(),
        board_id: None,
        created_at,
        author: Some(PinAuthor {
            username: "demo-photographer".to_string(),
            display_name: Some("Demo Photographer".to_string()),
            avatar_url: Some("/diverse-profile-avatars.png".to_string()),
        }),
    }
}

// ============================================================================
// WithFallback
// ============================================================================

/// Tries `primary` first and serves the page from `fallback` when it fails.
#[derive(Debug, Clone)]
pub struct WithFallback<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> WithFallback<P, F> {
    /// Wraps two sources.
    pub const fn new(primary: P, fallback: F) -> Self { Self { primary, fallback } }
}

impl<P, F> PageSource for WithFallback<P, F>
where
    P: PageSource + Send,
    F: PageSource + Send,
{
    fn fetch_page(
        &mut self,
        page: u32,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Pin>, FeedError>> + Send {
        async move {
            match self.primary.fetch_page(page, limit).await {
                Ok(pins) => Ok(pins),
                Err(err) => {
                    tracing::warn!(page, "feed: {err}, serving fallback page");
                    self.fallback.fetch_page(page, limit).await
                }
            }
        }
    }
}
