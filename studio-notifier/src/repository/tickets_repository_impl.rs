use super::{
    entity::{TicketFindEntity, TicketInsertEntity},
    Error, TicketsRepository,
};
use axum::async_trait;
use bson::{doc, DateTime, Document};
use mongodb::{options::IndexOptions, Database, IndexModel};
use std::time::Duration;
use time::OffsetDateTime;
use uuid::Uuid;

const TICKETS: &str = "realtime_tickets";
const INDEX_NAME_UNIQUE_TICKET: &str = "unique_ticket";
const INDEX_NAME_EXPIRE_AT: &str = "ttl_expire_at";

pub struct TicketsRepositoryImpl {
    database: Database,
}

impl TicketsRepositoryImpl {
    pub async fn new(database: Database) -> Result<Self, mongodb::error::Error> {
        let collection = database.collection::<Document>(TICKETS);

        collection
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "ticket": 1 })
                    .options(
                        IndexOptions::builder()
                            .name(INDEX_NAME_UNIQUE_TICKET.to_string())
                            .unique(true)
                            .build(),
                    )
                    .build(),
            )
            .await?;
        tracing::debug!("ensured index {TICKETS}.{INDEX_NAME_UNIQUE_TICKET}");

        // Mongo removes unused tickets once they expire
        collection
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "expire_at": 1 })
                    .options(
                        IndexOptions::builder()
                            .name(INDEX_NAME_EXPIRE_AT.to_string())
                            .expire_after(Duration::ZERO)
                            .build(),
                    )
                    .build(),
            )
            .await?;
        tracing::debug!("ensured index {TICKETS}.{INDEX_NAME_EXPIRE_AT}");

        Ok(Self { database })
    }
}

#[async_trait]
impl TicketsRepository for TicketsRepositoryImpl {
    async fn insert(
        &self,
        ticket: &str,
        user_id: Uuid,
        issued_at: OffsetDateTime,
        expire_at: OffsetDateTime,
    ) -> Result<(), Error> {
        let insert_entity = TicketInsertEntity {
            ticket,
            user_id: user_id.into(),
            issued_at: issued_at.into(),
            expire_at: expire_at.into(),
        };

        self.database
            .collection::<TicketInsertEntity>(TICKETS)
            .insert_one(insert_entity)
            .await?;

        Ok(())
    }

    async fn consume(&self, ticket: &str, now: OffsetDateTime) -> Result<Option<Uuid>, Error> {
        // The expiry filter is needed too, Mongo prunes expired documents lazily
        let entity = self
            .database
            .collection::<TicketFindEntity>(TICKETS)
            .find_one_and_delete(doc! {
                "ticket": ticket,
                "expire_at": { "$gt": DateTime::from(now) },
            })
            .await?;

        Ok(entity.map(|entity| Uuid::from(entity.user_id)))
    }
}
