use super::{NotificationsService, NotificationsServiceConfig};
use crate::{
    dto::input,
    error::Error,
    repository::{self, Notification, NotificationsRepository},
    service::changes_service::{ChangesService, NotificationChange},
};
use axum::async_trait;
use bson::oid::ObjectId;
use std::{future::Future, sync::Arc};
use time::OffsetDateTime;
use uuid::Uuid;

pub struct NotificationsServiceImpl {
    config: NotificationsServiceConfig,
    repository: Arc<dyn NotificationsRepository>,
    changes_service: Arc<dyn ChangesService>,
}

impl NotificationsServiceImpl {
    pub fn new(
        config: NotificationsServiceConfig,
        repository: Arc<dyn NotificationsRepository>,
        changes_service: Arc<dyn ChangesService>,
    ) -> Self {
        Self {
            config,
            repository,
            changes_service,
        }
    }

    async fn with_timeout<T>(
        &self,
        operation: impl Future<Output = Result<T, repository::Error>>,
    ) -> Result<T, Error> {
        match tokio::time::timeout(self.config.operation_timeout, operation).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(Error::OperationTimeout),
        }
    }

    fn publish(&self, changes: impl IntoIterator<Item = NotificationChange>) {
        for change in changes {
            self.changes_service.send(change);
        }
    }
}

#[async_trait]
impl NotificationsService for NotificationsServiceImpl {
    async fn find_notifications(
        &self,
        user_id: Uuid,
        pagination: input::Pagination,
        filters: input::NotificationFilters,
    ) -> Result<Vec<Notification>, Error> {
        tracing::info!(?pagination, ?filters, "finding notifications");

        if pagination.page_size == 0 {
            return Err(Error::Validation("page_size must be greater than 0"));
        }

        let notifications = self
            .with_timeout(self.repository.find_many(user_id, pagination, filters))
            .await?;
        tracing::info!(count = notifications.len(), "found notifications");

        Ok(notifications)
    }

    async fn unread_count(&self, user_id: Uuid) -> Result<u64, Error> {
        tracing::info!("counting unread notifications");

        let count = self
            .with_timeout(self.repository.count_unread(user_id))
            .await?;
        tracing::info!(count, "counted unread notifications");

        Ok(count)
    }

    async fn mark_read(&self, id: ObjectId, user_id: Uuid) -> Result<(), Error> {
        tracing::info!(%id, "marking notification as read");

        let notification = self
            .with_timeout(
                self.repository
                    .mark_read(id, user_id, OffsetDateTime::now_utc()),
            )
            .await?;

        match notification {
            Some(notification) => {
                self.publish([NotificationChange::Updated(notification)]);
                tracing::info!(%id, "marked notification as read");
            }
            None => tracing::info!(%id, "nothing to mark"),
        }

        Ok(())
    }

    async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, Error> {
        tracing::info!("marking all notifications as read");

        let notifications = self
            .with_timeout(
                self.repository
                    .mark_all_read(user_id, OffsetDateTime::now_utc()),
            )
            .await?;

        let count = notifications.len() as u64;
        self.publish(notifications.into_iter().map(NotificationChange::Updated));
        tracing::info!(count, "marked notifications as read");

        Ok(count)
    }

    async fn delete(&self, id: ObjectId, user_id: Uuid) -> Result<(), Error> {
        tracing::info!(%id, "deleting notification");

        let notification = self
            .with_timeout(self.repository.delete(id, user_id))
            .await?;

        match notification {
            Some(notification) => {
                self.publish([NotificationChange::Deleted(notification)]);
                tracing::info!(%id, "deleted notification");
            }
            None => tracing::info!(%id, "nothing to delete"),
        }

        Ok(())
    }

    async fn delete_all_read(&self, user_id: Uuid) -> Result<u64, Error> {
        tracing::info!("deleting read notifications");

        let deleted = self
            .with_timeout(self.repository.delete_all_read(user_id))
            .await?;

        // Deleting a row twice leaves the mirror unchanged, all of them are published
        let count = deleted.deleted_count;
        self.publish(deleted.notifications.into_iter().map(NotificationChange::Deleted));
        tracing::info!(count, "deleted read notifications");

        Ok(count)
    }
}
