use super::{DeletedNotifications, Error, NewNotification, Notification};
use crate::dto::input;
use axum::async_trait;
use bson::oid::ObjectId;
use time::OffsetDateTime;
use uuid::Uuid;

///
/// Every query is filtered by the owner, so rows of other
/// users are never matched, modified or reported.
///
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationsRepository: Send + Sync {
    ///
    /// Inserts one unread notification per entry.
    ///
    /// ### Returns
    /// Inserted notifications in the same order as input
    ///
    async fn insert_many(
        &self,
        notifications: Vec<NewNotification>,
        created_at: OffsetDateTime,
    ) -> Result<Vec<Notification>, Error>;

    ///
    /// Finds user's notifications.
    /// Notifications are sorted descending by creation date.
    ///
    async fn find_many(
        &self,
        user_id: Uuid,
        pagination: input::Pagination,
        filters: input::NotificationFilters,
    ) -> Result<Vec<Notification>, Error>;

    async fn count_unread(&self, user_id: Uuid) -> Result<u64, Error>;

    ///
    /// Sets read_at if notification is still unread.
    ///
    /// ### Returns
    /// Updated notification or None when
    ///     - notification does not exist
    ///     - notification does not belong to the user
    ///     - notification was already read
    ///
    async fn mark_read(
        &self,
        id: ObjectId,
        user_id: Uuid,
        read_at: OffsetDateTime,
    ) -> Result<Option<Notification>, Error>;

    ///
    /// Sets read_at of every unread user's notification.
    ///
    /// ### Returns
    /// Notifications modified by this call
    ///
    async fn mark_all_read(
        &self,
        user_id: Uuid,
        read_at: OffsetDateTime,
    ) -> Result<Vec<Notification>, Error>;

    ///
    /// ### Returns
    /// Deleted notification or None when
    ///     - notification does not exist
    ///     - notification does not belong to the user
    ///
    async fn delete(&self, id: ObjectId, user_id: Uuid) -> Result<Option<Notification>, Error>;

    ///
    /// Deletes every read user's notification. Unread ones are kept.
    ///
    /// ### Returns
    /// Deleted notifications and number of rows this call removed
    ///
    async fn delete_all_read(&self, user_id: Uuid) -> Result<DeletedNotifications, Error>;

    ///
    /// Deletes every notification of the user, used when account is removed
    ///
    /// ### Returns
    /// Number of deleted notifications
    ///
    async fn delete_all(&self, user_id: Uuid) -> Result<u64, Error>;
}
