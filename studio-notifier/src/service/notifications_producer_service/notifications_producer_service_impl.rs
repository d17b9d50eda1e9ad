use super::{
    notification_copy::{notification_copy, NotificationCopy},
    recipients::{resolve_recipients, Recipients},
    NotificationsProducerService,
};
use crate::{
    dto::input::DomainEvent,
    repository::{self, NewNotification, NotificationsRepository, UsersRepository},
    service::changes_service::{ChangesService, NotificationChange},
};
use axum::async_trait;
use std::sync::Arc;
use time::OffsetDateTime;
use uuid::Uuid;

pub struct NotificationsProducerServiceImpl {
    notifications_repository: Arc<dyn NotificationsRepository>,
    users_repository: Arc<dyn UsersRepository>,
    changes_service: Arc<dyn ChangesService>,
}

impl NotificationsProducerServiceImpl {
    pub fn new(
        notifications_repository: Arc<dyn NotificationsRepository>,
        users_repository: Arc<dyn UsersRepository>,
        changes_service: Arc<dyn ChangesService>,
    ) -> Self {
        Self {
            notifications_repository,
            users_repository,
            changes_service,
        }
    }

    async fn recipient_ids(&self, recipients: Recipients) -> Result<Vec<Uuid>, repository::Error> {
        let user_ids = match recipients {
            Recipients::Administrators => self.users_repository.find_admin_ids().await?,
            Recipients::AnyAdministrator => self
                .users_repository
                .find_first_admin_id()
                .await?
                .into_iter()
                .collect(),
            Recipients::User(user_id) => vec![user_id],
            Recipients::Nobody => Vec::new(),
        };

        Ok(user_ids)
    }

    async fn try_produce(&self, event: DomainEvent) -> Result<usize, repository::Error> {
        if let DomainEvent::UserDeleted { user_id } = event {
            return self.remove_user(user_id).await;
        }

        let Some(copy) = notification_copy(&event) else {
            return Ok(0);
        };

        let user_ids = self.recipient_ids(resolve_recipients(&event)).await?;
        if user_ids.is_empty() {
            tracing::info!("no recipients resolved");
            return Ok(0);
        }
        tracing::debug!(?user_ids, "resolved recipients");

        let notifications = user_ids
            .into_iter()
            .map(|user_id| {
                let NotificationCopy {
                    notification_type,
                    title,
                    message,
                    link,
                } = copy.clone();
                NewNotification {
                    user_id,
                    notification_type,
                    title,
                    message,
                    link,
                }
            })
            .collect();

        let inserted = self
            .notifications_repository
            .insert_many(notifications, OffsetDateTime::now_utc())
            .await?;

        let count = inserted.len();
        for notification in inserted {
            self.changes_service
                .send(NotificationChange::Inserted(notification));
        }

        Ok(count)
    }

    async fn remove_user(&self, user_id: Uuid) -> Result<usize, repository::Error> {
        tracing::info!(%user_id, "removing notifications of deleted user");

        let deleted_count = self.notifications_repository.delete_all(user_id).await?;
        let closed_count = self.changes_service.close(user_id);
        tracing::info!(
            %user_id,
            deleted_count,
            closed_count,
            "removed notifications of deleted user"
        );

        Ok(0)
    }
}

#[async_trait]
impl NotificationsProducerService for NotificationsProducerServiceImpl {
    async fn produce(&self, event: DomainEvent) -> usize {
        tracing::info!("producing notifications");
        tracing::trace!(?event);

        match self.try_produce(event).await {
            Ok(count) => {
                tracing::info!(count, "produced notifications");
                count
            }
            Err(err) => {
                tracing::warn!(%err, "failed to produce notifications");
                0
            }
        }
    }
}
