//! Event Bus adapters
//!
//! Implements the EventBus port for registry notifications

use crate::events::RegistryEvent;
use crate::ports::EventBus;
use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::debug;

/// Default broadcast channel capacity
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// Broadcast-only event bus for long-running processes.
///
/// Fans events out to live subscribers and keeps nothing once sent.
/// Subscribers that fall more than `capacity` events behind observe
/// `RecvError::Lagged`.
pub struct BroadcastEventBus {
    sender: broadcast::Sender<RegistryEvent>,
}

impl BroadcastEventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Receive every event published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventBus for BroadcastEventBus {
    async fn publish(&self, event: RegistryEvent) -> Result<(), String> {
        // No subscribers is not an error
        let receivers = self.sender.send(event).unwrap_or(0);
        debug!(receivers, "Registry event published");
        Ok(())
    }
}

/// In-memory event bus for testing.
///
/// Keeps an unbounded journal of every published event and also fans each
/// one out to live subscribers over a `tokio::sync::broadcast` channel.
pub struct InMemoryEventBus {
    journal: parking_lot::RwLock<Vec<RegistryEvent>>,
    sender: broadcast::Sender<RegistryEvent>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            journal: parking_lot::RwLock::new(Vec::new()),
            sender,
        }
    }

    /// Receive every event published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.sender.subscribe()
    }

    pub fn get_events(&self) -> Vec<RegistryEvent> {
        self.journal.read().clone()
    }

    pub fn event_count(&self) -> usize {
        self.journal.read().len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn publish(&self, event: RegistryEvent) -> Result<(), String> {
        self.journal.write().push(event.clone());

        // No subscribers is not an error; the journal still has the event
        let receivers = self.sender.send(event).unwrap_or(0);
        debug!(receivers, "Registry event published");
        Ok(())
    }
}

/// Event bus that drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEventBus;

#[async_trait]
impl EventBus for NoopEventBus {
    async fn publish(&self, _event: RegistryEvent) -> Result<(), String> {
        Ok(())
    }
}
