use super::{BridgeHandle, NotificationsMirror, RealtimeBridgeConfig};
use crate::{
    dto::input,
    service::{
        changes_service::{ChangesService, ChangesSubscription},
        notifications_service::NotificationsService,
    },
};
use std::sync::Arc;
use tokio::sync::{broadcast::error::RecvError, watch};
use uuid::Uuid;

///
/// Keeps mirrors of users' notifications in sync with the store.
/// Every activation runs as a separate task.
///
pub struct RealtimeBridge {
    loader: MirrorLoader,
    changes_service: Arc<dyn ChangesService>,
}

impl RealtimeBridge {
    pub fn new(
        config: RealtimeBridgeConfig,
        notifications_service: Arc<dyn NotificationsService>,
        changes_service: Arc<dyn ChangesService>,
    ) -> Self {
        Self {
            loader: MirrorLoader {
                snapshot_limit: config.snapshot_limit,
                notifications_service,
            },
            changes_service,
        }
    }

    ///
    /// Starts bridge of the user. Subscription is created before the snapshot
    /// is taken, so changes made while loading are not lost.
    ///
    pub async fn activate(&self, user_id: Uuid) -> BridgeHandle {
        tracing::info!(%user_id, "activating realtime bridge");

        let subscription = self.changes_service.subscribe(user_id);
        let mirror = self.loader.load(user_id).await;
        tracing::debug!(
            %user_id,
            count = mirror.notifications().len(),
            unread_count = mirror.unread_count(),
            "seeded mirror"
        );

        let (state_tx, state_rx) = watch::channel(mirror);
        let task = tokio::spawn(Self::run(self.loader.clone(), subscription, state_tx));

        BridgeHandle::new(user_id, state_rx, task)
    }

    ///
    /// Replaces bridge held in `handle` with bridge of `user_id`.
    /// Previous bridge is stopped before the new one subscribes.
    ///
    pub async fn reactivate(&self, handle: &mut Option<BridgeHandle>, user_id: Uuid) {
        if let Some(previous) = handle.take() {
            tracing::info!(user_id = %previous.user_id(), "stopping realtime bridge");
            previous.close().await;
        }

        *handle = Some(self.activate(user_id).await);
    }

    async fn run(
        loader: MirrorLoader,
        mut subscription: ChangesSubscription,
        state_tx: watch::Sender<NotificationsMirror>,
    ) {
        let user_id = subscription.user_id();

        loop {
            tokio::select! {
                // Every handle is gone
                _ = state_tx.closed() => {
                    tracing::debug!(%user_id, "realtime bridge released");
                    break;
                }

                change = subscription.recv() => match change {
                    Ok(change) => {
                        if change.user_id() != user_id {
                            tracing::warn!(%user_id, "skipped change of other user");
                            continue;
                        }
                        tracing::trace!(?change, "applying change");
                        state_tx.send_modify(|mirror| mirror.apply(&change));
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(%user_id, skipped, "realtime bridge lagged, reseeding");
                        let mirror = loader.load(user_id).await;
                        state_tx.send_replace(mirror);
                    }
                    Err(RecvError::Closed) => {
                        tracing::info!(%user_id, "changes feed closed");
                        break;
                    }
                }
            }
        }
    }
}

#[derive(Clone)]
struct MirrorLoader {
    snapshot_limit: u32,
    notifications_service: Arc<dyn NotificationsService>,
}

impl MirrorLoader {
    fn limit(&self) -> usize {
        self.snapshot_limit as usize
    }

    ///
    /// Loads snapshot and unread count. Failure results in an empty mirror.
    ///
    async fn load(&self, user_id: Uuid) -> NotificationsMirror {
        let pagination = input::Pagination {
            page_idx: 0,
            page_size: self.snapshot_limit,
        };

        let (notifications, unread_count) = tokio::join!(
            self.notifications_service.find_notifications(
                user_id,
                pagination,
                input::NotificationFilters::default(),
            ),
            self.notifications_service.unread_count(user_id),
        );

        match (notifications, unread_count) {
            (Ok(notifications), Ok(unread_count)) => {
                NotificationsMirror::new(notifications, unread_count, self.limit())
            }
            (Err(err), _) | (_, Err(err)) => {
                tracing::warn!(%user_id, %err, "failed to load mirror");
                NotificationsMirror::empty(self.limit())
            }
        }
    }
}
