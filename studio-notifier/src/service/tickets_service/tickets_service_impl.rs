use super::{TicketsService, TicketsServiceConfig};
use crate::{
    dto::{input, output},
    error::Error,
    repository::TicketsRepository,
};
use axum::async_trait;
use std::sync::Arc;
use time::OffsetDateTime;
use uuid::Uuid;

pub struct TicketsServiceImpl {
    config: TicketsServiceConfig,
    repository: Arc<dyn TicketsRepository>,
}

impl TicketsServiceImpl {
    pub fn new(config: TicketsServiceConfig, repository: Arc<dyn TicketsRepository>) -> Self {
        Self { config, repository }
    }
}

#[async_trait]
impl TicketsService for TicketsServiceImpl {
    async fn issue(&self, user_id: Uuid) -> Result<output::RealtimeTicket, Error> {
        let issued_at = OffsetDateTime::now_utc();
        let expire_at = issued_at + self.config.ticket_lifespan;
        let ticket = Uuid::new_v4().simple().to_string();

        self.repository
            .insert(&ticket, user_id, issued_at, expire_at)
            .await?;
        tracing::info!(%user_id, %expire_at, "issued realtime ticket");

        Ok(output::RealtimeTicket { ticket })
    }

    async fn consume(
        &self,
        input::RealtimeTicket { ticket }: input::RealtimeTicket,
    ) -> Result<Uuid, Error> {
        if ticket.is_empty() {
            return Err(Error::TicketInvalid("ticket empty"));
        }

        let user_id = self
            .repository
            .consume(&ticket, OffsetDateTime::now_utc())
            .await?
            .ok_or(Error::TicketInvalid("ticket unknown, used or expired"))?;
        tracing::info!(%user_id, "consumed realtime ticket");

        Ok(user_id)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::repository::{self, MockTicketsRepository};
    use std::{sync::Mutex, time::Duration};

    fn create_config() -> TicketsServiceConfig {
        TicketsServiceConfig {
            ticket_lifespan: Duration::from_secs(30),
        }
    }

    #[tokio::test]
    async fn issue_stores_ticket_with_lifespan() {
        let user_id = Uuid::new_v4();
        let stored = Arc::new(Mutex::new(None));

        let mut repository = MockTicketsRepository::new();
        let stored_clone = stored.clone();
        repository
            .expect_insert()
            .times(1)
            .returning(move |ticket, owner, issued_at, expire_at| {
                assert_eq!(owner, user_id);
                assert_eq!(expire_at - issued_at, time::Duration::seconds(30));
                *stored_clone.lock().unwrap() = Some(ticket.to_string());
                Ok(())
            });
        let service = TicketsServiceImpl::new(create_config(), Arc::new(repository));

        let issued = service.issue(user_id).await.unwrap();

        assert_eq!(stored.lock().unwrap().as_deref(), Some(issued.ticket.as_str()));
    }

    #[tokio::test]
    async fn issue_tickets_differ() {
        let mut repository = MockTicketsRepository::new();
        repository.expect_insert().returning(|_, _, _, _| Ok(()));
        let service = TicketsServiceImpl::new(create_config(), Arc::new(repository));

        let user_id = Uuid::new_v4();
        let first = service.issue(user_id).await.unwrap();
        let second = service.issue(user_id).await.unwrap();

        assert_ne!(first.ticket, second.ticket);
    }

    #[tokio::test]
    async fn issue_database_error() {
        let mut repository = MockTicketsRepository::new();
        repository.expect_insert().returning(|_, _, _, _| {
            Err(repository::Error::Mongo(
                mongodb::error::ErrorKind::Custom(Arc::new("any database error")).into(),
            ))
        });
        let service = TicketsServiceImpl::new(create_config(), Arc::new(repository));

        let result = service.issue(Uuid::new_v4()).await;

        assert!(matches!(result, Err(Error::Database(_))));
    }

    #[tokio::test]
    async fn consume_returns_owner() {
        let user_id = Uuid::new_v4();

        let mut repository = MockTicketsRepository::new();
        repository
            .expect_consume()
            .withf(|ticket, _| ticket == "abc")
            .returning(move |_, _| Ok(Some(user_id)));
        let service = TicketsServiceImpl::new(create_config(), Arc::new(repository));

        let owner = service
            .consume(input::RealtimeTicket {
                ticket: "abc".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(owner, user_id);
    }

    #[tokio::test]
    async fn consume_unknown_ticket() {
        let mut repository = MockTicketsRepository::new();
        repository.expect_consume().returning(|_, _| Ok(None));
        let service = TicketsServiceImpl::new(create_config(), Arc::new(repository));

        let result = service
            .consume(input::RealtimeTicket {
                ticket: "abc".to_string(),
            })
            .await;

        assert!(matches!(result, Err(Error::TicketInvalid(_))));
    }

    #[tokio::test]
    async fn consume_empty_ticket_skips_database() {
        let mut repository = MockTicketsRepository::new();
        repository.expect_consume().never();
        let service = TicketsServiceImpl::new(create_config(), Arc::new(repository));

        let result = service
            .consume(input::RealtimeTicket {
                ticket: String::new(),
            })
            .await;

        assert!(matches!(result, Err(Error::TicketInvalid(_))));
    }

    #[tokio::test]
    async fn consume_database_error() {
        let mut repository = MockTicketsRepository::new();
        repository.expect_consume().returning(|_, _| {
            Err(repository::Error::Mongo(
                mongodb::error::ErrorKind::Custom(Arc::new("any database error")).into(),
            ))
        });
        let service = TicketsServiceImpl::new(create_config(), Arc::new(repository));

        let result = service
            .consume(input::RealtimeTicket {
                ticket: "abc".to_string(),
            })
            .await;

        assert!(matches!(result, Err(Error::Database(_))));
    }
}
