use super::{ChangesService, ChangesServiceConfig, ChangesSubscription, NotificationChange};
use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock, Weak},
};
use tokio::sync::broadcast;
use uuid::Uuid;

type UsersChannels = RwLock<HashMap<Uuid, broadcast::Sender<Arc<NotificationChange>>>>;

pub struct BroadcastChangesService {
    config: ChangesServiceConfig,
    users_channels: Arc<UsersChannels>,
}

impl BroadcastChangesService {
    pub fn new(config: ChangesServiceConfig) -> Self {
        let users_channels = HashMap::new();
        let users_channels = RwLock::new(users_channels);
        let users_channels = Arc::new(users_channels);

        Self {
            config,
            users_channels,
        }
    }

    fn release(users_channels: Weak<UsersChannels>, user_id: Uuid) {
        let Some(users_channels) = users_channels.upgrade() else {
            return;
        };

        let mut channels = users_channels
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let unused = channels
            .get(&user_id)
            .map(|tx| tx.receiver_count() == 0)
            .unwrap_or(false);
        if unused {
            channels.remove(&user_id);
            tracing::debug!(%user_id, "released changes channel");
        }
    }
}

impl ChangesService for BroadcastChangesService {
    fn send(&self, change: NotificationChange) {
        let user_id = change.user_id();
        let id = change.notification().id.to_hex();

        let channels = self
            .users_channels
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let Some(tx) = channels.get(&user_id) else {
            tracing::trace!(%user_id, %id, "no subscribers, change dropped");
            return;
        };

        let receivers = tx.send(Arc::new(change)).unwrap_or(0);
        tracing::debug!(%user_id, %id, receivers, "change sent");
    }

    fn subscribe(&self, user_id: Uuid) -> ChangesSubscription {
        let receiver = {
            let mut channels = self
                .users_channels
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            channels
                .entry(user_id)
                .or_insert_with(|| broadcast::channel(self.config.buffer_size).0)
                .subscribe()
        };
        tracing::debug!(%user_id, "subscribed to changes");

        let users_channels = Arc::downgrade(&self.users_channels);
        ChangesSubscription::new(user_id, receiver, move || {
            Self::release(users_channels, user_id)
        })
    }

    fn close(&self, user_id: Uuid) -> usize {
        let count = {
            let mut channels = self
                .users_channels
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            channels.remove(&user_id)
        }
        .map(|tx| tx.receiver_count())
        .unwrap_or(0);

        tracing::info!(%user_id, count, "closed changes channel");

        count
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::repository::{Notification, NotificationType};
    use bson::oid::ObjectId;
    use broadcast::error::RecvError;
    use std::time::Duration;
    use time::OffsetDateTime;
    use tokio::time::timeout;

    #[tokio::test]
    async fn send_delivered_to_owner_only() {
        let service = create_service(8);
        let user_1_id = Uuid::new_v4();
        let user_2_id = Uuid::new_v4();

        let mut subscription_1 = service.subscribe(user_1_id);
        let mut subscription_2 = service.subscribe(user_2_id);

        service.send(NotificationChange::Inserted(create_notification(user_1_id)));

        let (t1, t2) = tokio::join!(
            timeout(Duration::from_millis(100), subscription_1.recv()),
            timeout(Duration::from_millis(100), subscription_2.recv()),
        );

        let change = t1.unwrap().unwrap();
        assert_eq!(change.user_id(), user_1_id);
        assert!(t2.is_err());
    }

    #[tokio::test]
    async fn send_delivered_to_every_subscription_of_the_user() {
        let service = create_service(8);
        let user_id = Uuid::new_v4();

        let mut subscription_1 = service.subscribe(user_id);
        let mut subscription_2 = service.subscribe(user_id);

        service.send(NotificationChange::Deleted(create_notification(user_id)));

        let (t1, t2) = tokio::join!(
            timeout(Duration::from_millis(100), subscription_1.recv()),
            timeout(Duration::from_millis(100), subscription_2.recv()),
        );

        assert!(matches!(
            *t1.unwrap().unwrap(),
            NotificationChange::Deleted(_)
        ));
        assert!(matches!(
            *t2.unwrap().unwrap(),
            NotificationChange::Deleted(_)
        ));
    }

    #[tokio::test]
    async fn send_without_subscribers_dropped() {
        let service = create_service(8);
        let user_id = Uuid::new_v4();

        service.send(NotificationChange::Inserted(create_notification(user_id)));

        let mut subscription = service.subscribe(user_id);
        let result = timeout(Duration::from_millis(100), subscription.recv()).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn dropping_last_subscription_releases_channel() {
        let service = create_service(8);
        let user_id = Uuid::new_v4();

        let subscription_1 = service.subscribe(user_id);
        let subscription_2 = service.subscribe(user_id);

        drop(subscription_1);
        assert!(service.users_channels.read().unwrap().contains_key(&user_id));

        drop(subscription_2);
        assert!(!service.users_channels.read().unwrap().contains_key(&user_id));
    }

    #[tokio::test]
    async fn close_subscriptions_receive_closed() {
        let service = create_service(8);
        let user_id = Uuid::new_v4();

        let mut subscription = service.subscribe(user_id);

        let count = service.close(user_id);

        let result = timeout(Duration::from_millis(100), subscription.recv())
            .await
            .unwrap();
        assert_eq!(count, 1);
        assert!(matches!(result, Err(RecvError::Closed)));
    }

    #[tokio::test]
    async fn close_without_subscriptions() {
        let service = create_service(8);

        let count = service.close(Uuid::new_v4());

        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn subscription_lagged_when_buffer_overflows() {
        let service = create_service(2);
        let user_id = Uuid::new_v4();

        let mut subscription = service.subscribe(user_id);
        for _ in 0..3 {
            service.send(NotificationChange::Inserted(create_notification(user_id)));
        }

        let result = subscription.recv().await;

        assert!(matches!(result, Err(RecvError::Lagged(1))));
    }

    fn create_service(buffer_size: usize) -> BroadcastChangesService {
        BroadcastChangesService::new(ChangesServiceConfig { buffer_size })
    }

    fn create_notification(user_id: Uuid) -> Notification {
        Notification {
            id: ObjectId::new(),
            user_id,
            notification_type: NotificationType::NewMessage,
            title: "New Message".to_string(),
            message: "You have a new message on project \"Spring Campaign\"".to_string(),
            link: None,
            read_at: None,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}
