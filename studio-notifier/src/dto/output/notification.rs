use crate::repository::{self, NotificationType};
use serde::Serialize;
use time::{macros::format_description, OffsetDateTime};

#[derive(Debug, Serialize)]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub read_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub created_ago: String,
}

impl Notification {
    pub fn new(notification: repository::Notification, now: OffsetDateTime) -> Self {
        Self {
            id: notification.id.to_hex(),
            notification_type: notification.notification_type,
            title: notification.title,
            message: notification.message,
            link: notification.link,
            read_at: notification.read_at,
            created_ago: time_ago(notification.created_at, now),
            created_at: notification.created_at,
        }
    }
}

///
/// Short label describing how long ago `at` happened.
/// Anything older than a week is shown as a calendar date.
///
pub fn time_ago(at: OffsetDateTime, now: OffsetDateTime) -> String {
    let elapsed = now - at;

    let minutes = elapsed.whole_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }

    let hours = elapsed.whole_hours();
    if hours < 24 {
        return format!("{hours}h ago");
    }

    let days = elapsed.whole_days();
    if days < 7 {
        return format!("{days}d ago");
    }

    at.format(format_description!(
        "[month padding:none]/[day padding:none]/[year]"
    ))
    .unwrap_or_default()
}
