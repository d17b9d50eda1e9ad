use super::{websocket_connection::WebSocketConnection, WebSocketsService, WebSocketsServiceConfig};
use crate::service::{changes_service::ChangesService, realtime_bridge::RealtimeBridge};
use axum::{async_trait, extract::ws::WebSocket};
use futures::StreamExt;
use std::{net::SocketAddr, sync::Arc};
use uuid::Uuid;

pub struct WebSocketsServiceImpl {
    config: Arc<WebSocketsServiceConfig>,
    realtime_bridge: Arc<RealtimeBridge>,
    changes_service: Arc<dyn ChangesService>,
}

impl WebSocketsServiceImpl {
    pub fn new(
        config: WebSocketsServiceConfig,
        realtime_bridge: Arc<RealtimeBridge>,
        changes_service: Arc<dyn ChangesService>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            realtime_bridge,
            changes_service,
        }
    }
}

#[async_trait]
impl WebSocketsService for WebSocketsServiceImpl {
    async fn handle_client(&self, user_id: Uuid, address: SocketAddr, websocket: WebSocket) {
        let bridge = self.realtime_bridge.activate(user_id).await;
        let (ws_tx, ws_rx) = websocket.split();

        let connection = WebSocketConnection::new(
            Arc::clone(&self.config),
            user_id,
            address,
            bridge,
            ws_tx,
            ws_rx,
        );
        connection.run().await;
    }

    async fn close_connections(&self, user_id: Uuid) {
        let count = self.changes_service.close(user_id);

        tracing::info!(%user_id, count, "closing user connections");
    }
}
