use super::ApplicationEnv;
use crate::{
    repository::{NotificationsRepositoryImpl, TicketsRepositoryImpl, UsersRepositoryImpl},
    service::{
        changes_service::{BroadcastChangesService, ChangesService, ChangesServiceConfig},
        notifications_producer_service::{
            NotificationsProducerService, NotificationsProducerServiceImpl,
        },
        notifications_service::{
            NotificationsService, NotificationsServiceConfig, NotificationsServiceImpl,
        },
        realtime_bridge::{RealtimeBridge, RealtimeBridgeConfig},
        tickets_service::{TicketsService, TicketsServiceConfig, TicketsServiceImpl},
        websockets_service::{
            WebSocketsService, WebSocketsServiceConfig, WebSocketsServiceImpl,
        },
    },
};
use mongodb::{options::ClientOptions, Client};
use std::sync::Arc;

#[derive(Clone)]
pub struct ApplicationState {
    pub notifications_service: Arc<dyn NotificationsService>,
    pub notifications_producer_service: Arc<dyn NotificationsProducerService>,
    pub websockets_service: Arc<dyn WebSocketsService>,
    pub tickets_service: Arc<dyn TicketsService>,
}

pub struct ApplicationStateToClose {
    pub db_client: Client,
}

pub async fn create_state(
    env: &ApplicationEnv,
) -> anyhow::Result<(ApplicationState, ApplicationStateToClose)> {
    tracing::info!("connecting to database");
    let db_client_options = ClientOptions::parse(&env.db_connection_string).await?;
    let db_client = Client::with_options(db_client_options)?;
    let db = db_client.database(&env.db_name);

    tracing::info!("creating repositories");
    let notifications_repository = Arc::new(NotificationsRepositoryImpl::new(db.clone()).await?);
    let tickets_repository = Arc::new(TicketsRepositoryImpl::new(db.clone()).await?);
    let users_repository = Arc::new(UsersRepositoryImpl::new(db));

    tracing::info!("creating services");
    let changes_service: Arc<dyn ChangesService> =
        Arc::new(BroadcastChangesService::new(ChangesServiceConfig {
            buffer_size: env.realtime_buffer_size,
        }));
    let notifications_service: Arc<dyn NotificationsService> =
        Arc::new(NotificationsServiceImpl::new(
            NotificationsServiceConfig {
                operation_timeout: env.operation_timeout,
            },
            notifications_repository.clone(),
            changes_service.clone(),
        ));
    let notifications_producer_service = Arc::new(NotificationsProducerServiceImpl::new(
        notifications_repository,
        users_repository,
        changes_service.clone(),
    ));
    let realtime_bridge = Arc::new(RealtimeBridge::new(
        RealtimeBridgeConfig {
            snapshot_limit: env.snapshot_limit,
        },
        notifications_service.clone(),
        changes_service.clone(),
    ));
    let websockets_service = Arc::new(WebSocketsServiceImpl::new(
        WebSocketsServiceConfig {
            ping_interval: env.websocket_ping_interval,
        },
        realtime_bridge,
        changes_service,
    ));
    let tickets_service = Arc::new(TicketsServiceImpl::new(
        TicketsServiceConfig {
            ticket_lifespan: env.realtime_ticket_lifespan,
        },
        tickets_repository,
    ));

    let state = ApplicationState {
        notifications_service,
        notifications_producer_service,
        websockets_service,
        tickets_service,
    };
    let state_to_close = ApplicationStateToClose { db_client };

    Ok((state, state_to_close))
}
