use super::NotificationType;
use uuid::Uuid;

///
/// Notification that is about to be inserted for one recipient
///
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
}
