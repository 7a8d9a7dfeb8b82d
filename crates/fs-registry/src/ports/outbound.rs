//! Driven ports (Outbound dependencies)

use crate::events::RegistryEvent;
use async_trait::async_trait;

/// Event bus for registry notifications
///
/// Called while the registry write lock is held, so events arrive in commit
/// order. A failure here is reported but never undoes the mutation.
#[async_trait]
pub trait EventBus: Send + Sync {
    /// Publish one event
    async fn publish(&self, event: RegistryEvent) -> Result<(), String>;
}
