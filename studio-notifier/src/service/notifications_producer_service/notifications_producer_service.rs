use crate::dto::input::DomainEvent;
use axum::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationsProducerService: Send + Sync {
    ///
    /// Turns domain event into notifications of every resolved recipient.
    /// Failures are logged and never returned, so reporting an event
    /// can't break the action that caused it.
    ///
    /// ### Returns
    /// Number of inserted notifications
    ///
    async fn produce(&self, event: DomainEvent) -> usize;
}
