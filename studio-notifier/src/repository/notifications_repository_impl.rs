use super::{
    entity::{NotificationFindEntity, NotificationInsertEntity},
    DeletedNotifications, Error, NewNotification, Notification, NotificationsRepository,
};
use crate::dto::input;
use axum::async_trait;
use bson::{doc, oid::ObjectId, Bson, DateTime, Document};
use futures::TryStreamExt;
use mongodb::{
    options::{IndexOptions, ReturnDocument},
    Collection, Database, IndexModel,
};
use time::OffsetDateTime;
use uuid::Uuid;

const NOTIFICATIONS: &str = "notifications";
const INDEX_NAME_USER_ID_CREATED_AT: &str = "index_user_id_created_at";
const INDEX_NAME_USER_ID_READ_AT: &str = "index_user_id_read_at";

pub struct NotificationsRepositoryImpl {
    database: Database,
}

impl NotificationsRepositoryImpl {
    pub async fn new(database: Database) -> Result<Self, mongodb::error::Error> {
        let collection = database.collection(NOTIFICATIONS);

        Self::create_index(
            &collection,
            INDEX_NAME_USER_ID_CREATED_AT,
            doc! { "user_id": 1, "created_at": -1 },
        )
        .await?;
        Self::create_index(
            &collection,
            INDEX_NAME_USER_ID_READ_AT,
            doc! { "user_id": 1, "read_at": 1 },
        )
        .await?;

        Ok(Self { database })
    }

    async fn create_index(
        collection: &Collection<Document>,
        name: &str,
        keys: Document,
    ) -> Result<(), mongodb::error::Error> {
        let index = IndexModel::builder()
            .keys(keys)
            .options(IndexOptions::builder().name(name.to_string()).build())
            .build();

        // Creating an index that already exists with the same keys is a no-op
        collection.create_index(index).await?;
        tracing::debug!("ensured index {NOTIFICATIONS}.{name}");

        Ok(())
    }

    fn collection(&self) -> Collection<NotificationFindEntity> {
        self.database.collection(NOTIFICATIONS)
    }

    async fn find_by_filter(&self, filter: Document) -> Result<Vec<Notification>, Error> {
        let notifications = self
            .collection()
            .find(filter)
            .sort(doc! { "created_at": -1, "_id": -1 })
            .await?
            .map_ok(Notification::from)
            .try_collect()
            .await?;

        Ok(notifications)
    }
}

#[async_trait]
impl NotificationsRepository for NotificationsRepositoryImpl {
    async fn insert_many(
        &self,
        notifications: Vec<NewNotification>,
        created_at: OffsetDateTime,
    ) -> Result<Vec<Notification>, Error> {
        if notifications.is_empty() {
            return Ok(Vec::new());
        }

        // Mongo keeps datetime in milliseconds
        let created_at = DateTime::from(created_at);

        let insert_entities = notifications
            .iter()
            .map(|notification| NotificationInsertEntity {
                user_id: bson::Uuid::from(notification.user_id),
                notification_type: notification.notification_type,
                title: notification.title.clone(),
                message: notification.message.clone(),
                link: notification.link.clone(),
                read_at: None,
                created_at,
            })
            .collect::<Vec<_>>();

        let insert_result = self
            .database
            .collection::<NotificationInsertEntity>(NOTIFICATIONS)
            .insert_many(&insert_entities)
            .await?;

        let mut inserted = Vec::with_capacity(notifications.len());
        for (idx, notification) in notifications.into_iter().enumerate() {
            let Some(Bson::ObjectId(id)) = insert_result.inserted_ids.get(&idx) else {
                tracing::error!("invalid type of inserted '_id'");
                return Err(Error::UnexpectedDocument("invalid type of inserted '_id'"));
            };

            inserted.push(Notification {
                id: *id,
                user_id: notification.user_id,
                notification_type: notification.notification_type,
                title: notification.title,
                message: notification.message,
                link: notification.link,
                read_at: None,
                created_at: created_at.into(),
            });
        }

        Ok(inserted)
    }

    async fn find_many(
        &self,
        user_id: Uuid,
        pagination: input::Pagination,
        input::NotificationFilters { read }: input::NotificationFilters,
    ) -> Result<Vec<Notification>, Error> {
        let mut filter = doc! { "user_id": bson::Uuid::from(user_id) };
        match read {
            Some(true) => filter.insert("read_at", doc! { "$ne": Bson::Null }),
            Some(false) => filter.insert("read_at", Bson::Null),
            None => None,
        };

        let notifications = self
            .collection()
            .find(filter)
            .sort(doc! { "created_at": -1, "_id": -1 })
            .skip(pagination.page_size as u64 * pagination.page_idx as u64)
            .limit(pagination.page_size as i64)
            .await?
            .map_ok(Notification::from)
            .try_collect()
            .await?;

        Ok(notifications)
    }

    async fn count_unread(&self, user_id: Uuid) -> Result<u64, Error> {
        let count = self
            .collection()
            .count_documents(doc! {
                "user_id": bson::Uuid::from(user_id),
                "read_at": Bson::Null,
            })
            .await?;

        Ok(count)
    }

    async fn mark_read(
        &self,
        id: ObjectId,
        user_id: Uuid,
        read_at: OffsetDateTime,
    ) -> Result<Option<Notification>, Error> {
        let notification = self
            .collection()
            .find_one_and_update(
                doc! {
                    "_id": id,
                    "user_id": bson::Uuid::from(user_id),
                    "read_at": Bson::Null,
                },
                doc! {
                    "$set": {
                        "read_at": DateTime::from(read_at),
                    }
                },
            )
            .return_document(ReturnDocument::After)
            .await?
            .map(Notification::from);

        Ok(notification)
    }

    async fn mark_all_read(
        &self,
        user_id: Uuid,
        read_at: OffsetDateTime,
    ) -> Result<Vec<Notification>, Error> {
        let user_id = bson::Uuid::from(user_id);
        let read_at = DateTime::from(read_at);

        let unread_ids = self
            .find_by_filter(doc! { "user_id": user_id, "read_at": Bson::Null })
            .await?
            .into_iter()
            .map(|notification| notification.id)
            .collect::<Vec<_>>();
        if unread_ids.is_empty() {
            return Ok(Vec::new());
        }

        self.collection()
            .update_many(
                doc! {
                    "_id": { "$in": unread_ids.clone() },
                    "user_id": user_id,
                    "read_at": Bson::Null,
                },
                doc! {
                    "$set": {
                        "read_at": read_at,
                    }
                },
            )
            .await?;

        // Rows marked concurrently by another request keep their own read_at
        self.find_by_filter(doc! {
            "_id": { "$in": unread_ids },
            "user_id": user_id,
            "read_at": read_at,
        })
        .await
    }

    async fn delete(&self, id: ObjectId, user_id: Uuid) -> Result<Option<Notification>, Error> {
        let notification = self
            .collection()
            .find_one_and_delete(doc! {
                "_id": id,
                "user_id": bson::Uuid::from(user_id),
            })
            .await?
            .map(Notification::from);

        Ok(notification)
    }

    async fn delete_all_read(&self, user_id: Uuid) -> Result<DeletedNotifications, Error> {
        let user_id = bson::Uuid::from(user_id);

        let read_notifications = self
            .find_by_filter(doc! {
                "user_id": user_id,
                "read_at": { "$ne": Bson::Null },
            })
            .await?;
        if read_notifications.is_empty() {
            return Ok(DeletedNotifications {
                notifications: read_notifications,
                deleted_count: 0,
            });
        }

        let ids = read_notifications
            .iter()
            .map(|notification| notification.id)
            .collect::<Vec<_>>();

        let delete_result = self
            .collection()
            .delete_many(doc! {
                "_id": { "$in": ids },
                "user_id": user_id,
                "read_at": { "$ne": Bson::Null },
            })
            .await?;

        Ok(DeletedNotifications {
            notifications: read_notifications,
            deleted_count: delete_result.deleted_count,
        })
    }

    async fn delete_all(&self, user_id: Uuid) -> Result<u64, Error> {
        let delete_result = self
            .collection()
            .delete_many(doc! { "user_id": bson::Uuid::from(user_id) })
            .await?;

        Ok(delete_result.deleted_count)
    }
}
