use super::Notification;
use crate::service::NotificationsMirror;
use serde::Serialize;
use time::OffsetDateTime;

///
/// State of the realtime mirror pushed to the websocket client
///
#[derive(Debug, Serialize)]
pub struct RealtimeFrame {
    pub notifications: Vec<Notification>,
    pub unread_count: u64,
}

impl RealtimeFrame {
    pub fn new(mirror: &NotificationsMirror, now: OffsetDateTime) -> Self {
        Self {
            notifications: mirror
                .notifications()
                .iter()
                .cloned()
                .map(|notification| Notification::new(notification, now))
                .collect(),
            unread_count: mirror.unread_count(),
        }
    }
}
