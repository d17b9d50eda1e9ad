use crate::repository::NotificationType;
use bson::{oid::ObjectId, DateTime, Uuid};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct NotificationFindEntity {
    pub _id: ObjectId,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub read_at: Option<DateTime>,
    pub created_at: DateTime,
}
