use super::Notification;

#[derive(Debug, Clone, PartialEq)]
pub struct DeletedNotifications {
    ///
    /// Rows matched before removal, a concurrent delete may have taken some of them
    ///
    pub notifications: Vec<Notification>,
    ///
    /// Rows removed by this call
    ///
    pub deleted_count: u64,
}
