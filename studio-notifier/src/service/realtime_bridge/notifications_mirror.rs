use crate::{repository::Notification, service::changes_service::NotificationChange};

///
/// Local view of user's newest notifications and the unread counter.
///
/// The counter starts as the store's count, so it may include rows
/// outside of the local rows until the first update recounts it.
/// At most `limit` newest rows are kept.
///
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationsMirror {
    notifications: Vec<Notification>,
    unread_count: u64,
    limit: usize,
}

impl NotificationsMirror {
    pub fn new(mut notifications: Vec<Notification>, unread_count: u64, limit: usize) -> Self {
        notifications.truncate(limit);

        Self {
            notifications,
            unread_count,
            limit,
        }
    }

    pub fn empty(limit: usize) -> Self {
        Self::new(Vec::new(), 0, limit)
    }

    ///
    /// Notifications sorted newest first
    ///
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> u64 {
        self.unread_count
    }

    pub fn apply(&mut self, change: &NotificationChange) {
        match change {
            NotificationChange::Inserted(notification) => self.insert(notification),
            NotificationChange::Updated(notification) => self.update(notification),
            NotificationChange::Deleted(notification) => self.delete(notification),
        }
    }

    fn insert(&mut self, notification: &Notification) {
        // Row already loaded by the snapshot
        if self.position(notification).is_some() {
            self.update(notification);
            return;
        }

        if notification.is_unread() {
            self.unread_count += 1;
        }
        self.notifications.insert(0, notification.clone());

        // Rows pushed out are still in the store, the counter keeps them
        self.notifications.truncate(self.limit);
    }

    fn update(&mut self, notification: &Notification) {
        if let Some(idx) = self.position(notification) {
            let current = &mut self.notifications[idx];
            let read_at = notification.read_at.or(current.read_at);
            *current = Notification {
                read_at,
                ..notification.clone()
            };
        }

        self.reconcile_unread_count();
    }

    fn delete(&mut self, notification: &Notification) {
        let removed = match self.position(notification) {
            Some(idx) => self.notifications.remove(idx),
            None => notification.clone(),
        };

        if removed.is_unread() {
            self.unread_count = self.unread_count.saturating_sub(1);
        }
    }

    fn reconcile_unread_count(&mut self) {
        self.unread_count = self
            .notifications
            .iter()
            .filter(|notification| notification.is_unread())
            .count() as u64;
    }

    fn position(&self, notification: &Notification) -> Option<usize> {
        self.notifications
            .iter()
            .position(|current| current.id == notification.id)
    }
}
