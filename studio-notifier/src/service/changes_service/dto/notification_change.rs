use crate::repository::Notification;
use uuid::Uuid;

///
/// Row level change of a single notification,
/// published after the store mutation succeeded
///
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationChange {
    Inserted(Notification),
    Updated(Notification),
    Deleted(Notification),
}

impl NotificationChange {
    pub fn notification(&self) -> &Notification {
        match self {
            Self::Inserted(notification)
            | Self::Updated(notification)
            | Self::Deleted(notification) => notification,
        }
    }

    pub fn user_id(&self) -> Uuid {
        self.notification().user_id
    }
}
