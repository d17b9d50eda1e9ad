use crate::repository::NotificationType;
use bson::{DateTime, Uuid};
use serde::Serialize;

#[derive(Serialize)]
pub struct NotificationInsertEntity {
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
    pub read_at: Option<DateTime>,
    pub created_at: DateTime,
}
