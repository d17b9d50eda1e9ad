use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct NotificationFilters {
    ///
    /// `Some(false)` keeps only unread notifications
    ///
    pub read: Option<bool>,
}
