//! Host side of viewport observation.
//!
//! A host is whatever renders the grid: it knows the container width and
//! whether the sentinel below the grid intersects the viewport. Hosts push
//! [`ViewportEvent`]s through a [`Subscription`]; dropping the subscription
//! releases it, so no notification reaches a torn-down grid.

use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::mpsc;

/// Notification delivered by a viewport host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportEvent {
    /// The sentinel entered (`true`) or left (`false`) the viewport.
    Visibility(bool),
    /// The container width changed.
    Resize(u32),
}

/// Errors from subscribing to a host.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ObserveError {
    /// The host cannot observe visibility at all.
    #[error("host does not support visibility observation")]
    Unsupported,
}

/// Receiving end of a host subscription.
#[derive(Debug)]
pub struct Subscription {
    rx: mpsc::UnboundedReceiver<ViewportEvent>,
}

impl Subscription {
    /// Wraps a receiver fed by a host.
    #[must_use]
    pub const fn new(rx: mpsc::UnboundedReceiver<ViewportEvent>) -> Self { Self { rx } }

    /// Waits for the next event. `None` once the host is gone.
    pub async fn recv(&mut self) -> Option<ViewportEvent> { self.rx.recv().await }

    /// Returns an already queued event without waiting.
    pub fn try_recv(&mut self) -> Option<ViewportEvent> { self.rx.try_recv().ok() }

    /// Drains every queued event.
    pub fn drain(&mut self) -> Vec<ViewportEvent> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}

/// A source of viewport notifications.
pub trait ViewportHost {
    /// Subscribes to visibility and resize notifications.
    ///
    /// # Errors
    ///
    /// Returns [`ObserveError::Unsupported`] when the host cannot observe
    /// visibility; callers should fall back to manual loading.
    fn subscribe(&self) -> Result<Subscription, ObserveError>;
}

/// In-process host that fans events out over channels.
///
/// Used by the CLI simulation and by tests, and by embedders that already
/// have their own visibility source.
#[derive(Debug)]
pub struct ChannelHost {
    senders: Mutex<Vec<mpsc::UnboundedSender<ViewportEvent>>>,
    supported: bool,
}

impl Default for ChannelHost {
    fn default() -> Self { Self::new() }
}

impl ChannelHost {
    /// A host that supports visibility observation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            senders: Mutex::new(Vec::new()),
            supported: true,
        }
    }

    /// A host that refuses every subscription.
    #[must_use]
    pub fn unsupported() -> Self {
        Self {
            senders: Mutex::new(Vec::new()),
            supported: false,
        }
    }

    /// Sends `event` to every live subscription.
    ///
    /// Dropped subscriptions are pruned. Returns the number of receivers.
    pub fn emit(&self, event: ViewportEvent) -> usize {
        let mut senders = self.senders.lock();
        senders.retain(|tx| tx.send(event).is_ok());
        senders.len()
    }

    /// Number of subscriptions that have not been dropped.
    pub fn subscriber_count(&self) -> usize {
        let mut senders = self.senders.lock();
        senders.retain(|tx| !tx.is_closed());
        senders.len()
    }
}

impl ViewportHost for ChannelHost {
    fn subscribe(&self) -> Result<Subscription, ObserveError> {
        if !self.supported {
            return Err(ObserveError::Unsupported);
        }
        let (tx, rx) = mpsc::unbounded_channel();
        self.senders.lock().push(tx);
        Ok(Subscription::new(rx))
    }
}
