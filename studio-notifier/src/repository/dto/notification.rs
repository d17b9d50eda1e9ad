use super::NotificationType;
use crate::repository::entity::NotificationFindEntity;
use bson::oid::ObjectId;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: ObjectId,
    pub user_id: Uuid,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
    pub read_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
}

impl Notification {
    pub fn is_unread(&self) -> bool {
        self.read_at.is_none()
    }
}

impl From<NotificationFindEntity> for Notification {
    fn from(entity: NotificationFindEntity) -> Self {
        Self {
            id: entity._id,
            user_id: entity.user_id.into(),
            notification_type: entity.notification_type,
            title: entity.title,
            message: entity.message,
            link: entity.link,
            read_at: entity.read_at.map(OffsetDateTime::from),
            created_at: entity.created_at.into(),
        }
    }
}
