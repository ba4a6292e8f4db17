//! Change events for the configuration store
//!
//! Provides:
//! - Event types describing which part of the configuration changed
//! - Event dispatcher for publishing events to subscribers
//!
//! Every committed store mutation publishes exactly one [`ConfigEvent`].
//! Subscribers read the new snapshot from the store; an event never carries a
//! partially updated configuration.

use tokio::sync::broadcast;

/// Which subtree of the configuration a mutation touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// The whole configuration was replaced (load, reset)
    Replaced,
    /// Width, depth or height changed
    Dimensions,
    /// Display colour changed
    Color,
    /// Roof covering changed
    Roof,
    /// A standard side panel or its features changed
    StandardPanel,
    /// Storage room settings (and the derived storage walls) changed
    StorageRoom,
    /// Gutter settings changed
    Gutter,
    /// Custom posts were added, moved or removed
    CustomPosts,
    /// Custom panels or their features changed
    CustomPanels,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ChangeKind::Replaced => "replaced",
            ChangeKind::Dimensions => "dimensions",
            ChangeKind::Color => "color",
            ChangeKind::Roof => "roof",
            ChangeKind::StandardPanel => "standard panel",
            ChangeKind::StorageRoom => "storage room",
            ChangeKind::Gutter => "gutter",
            ChangeKind::CustomPosts => "custom posts",
            ChangeKind::CustomPanels => "custom panels",
        };
        write!(f, "{}", name)
    }
}

/// Configuration change event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEvent {
    /// Store revision after the change (monotonic per store)
    pub revision: u64,
    /// The subtree that changed
    pub kind: ChangeKind,
}

impl std::fmt::Display for ConfigEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rev {}: {}", self.revision, self.kind)
    }
}

/// Receiving end of a store subscription
pub type EventReceiver = broadcast::Receiver<ConfigEvent>;

/// Event dispatcher for publishing events to subscribers
#[derive(Clone)]
pub struct EventDispatcher {
    /// Broadcast sender channel for configuration events.
    tx: broadcast::Sender<ConfigEvent>,
}

impl EventDispatcher {
    /// Create a new event dispatcher
    ///
    /// # Arguments
    /// * `buffer_size` - Size of the broadcast buffer (default 64)
    pub fn new(buffer_size: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer_size);
        Self { tx }
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> EventReceiver {
        self.tx.subscribe()
    }

    /// Publish an event to all subscribers
    ///
    /// Returns the number of subscribers that received it. Publishing with
    /// nobody listening is not an error for the store.
    pub fn publish(&self, event: ConfigEvent) -> usize {
        match self.tx.send(event) {
            Ok(count) => count,
            Err(broadcast::error::SendError(event)) => {
                tracing::trace!("No subscribers for {}", event);
                0
            }
        }
    }

    /// Get number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new(64)
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
