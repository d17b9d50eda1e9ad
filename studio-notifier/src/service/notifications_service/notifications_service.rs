use crate::{dto::input, error::Error, repository::Notification};
use axum::async_trait;
use bson::oid::ObjectId;
use uuid::Uuid;

///
/// Read state operations of the notification owner.
/// Notifications of other users are never touched, such calls are silent no-ops.
///
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationsService: Send + Sync {
    ///
    /// Find user's notifications, newest first
    ///
    /// ### Errors
    /// - [Error::Validation] when page_size is 0
    ///
    async fn find_notifications(
        &self,
        user_id: Uuid,
        pagination: input::Pagination,
        filters: input::NotificationFilters,
    ) -> Result<Vec<Notification>, Error>;

    async fn unread_count(&self, user_id: Uuid) -> Result<u64, Error>;

    ///
    /// Mark notification as read. Marking already read notification does nothing.
    ///
    async fn mark_read(&self, id: ObjectId, user_id: Uuid) -> Result<(), Error>;

    ///
    /// ### Returns
    /// Number of notifications that became read
    ///
    async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, Error>;

    ///
    /// Delete notification. Deleting not existing notification does nothing.
    ///
    async fn delete(&self, id: ObjectId, user_id: Uuid) -> Result<(), Error>;

    ///
    /// ### Returns
    /// Number of deleted notifications
    ///
    async fn delete_all_read(&self, user_id: Uuid) -> Result<u64, Error>;
}
