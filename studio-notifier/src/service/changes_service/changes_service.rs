use super::{ChangesSubscription, NotificationChange};
use uuid::Uuid;

///
/// Per-user feed of notification changes.
/// Changes of one user are never delivered to subscribers of another.
///
#[cfg_attr(test, mockall::automock)]
pub trait ChangesService: Send + Sync {
    ///
    /// Publishes change to every current subscriber of the notification owner.
    /// Change is dropped if owner has no subscribers.
    ///
    fn send(&self, change: NotificationChange);

    fn subscribe(&self, user_id: Uuid) -> ChangesSubscription;

    ///
    /// Closes feed of the user. Current subscribers receive end of stream.
    ///
    /// ### Returns
    /// Number of closed subscriptions
    ///
    fn close(&self, user_id: Uuid) -> usize;
}
