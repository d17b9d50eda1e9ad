use axum::{async_trait, extract::ws::WebSocket};
use std::net::SocketAddr;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WebSocketsService: Send + Sync {
    ///
    /// Streams realtime state of user's notifications
    /// until the connection is closed
    ///
    async fn handle_client(&self, user_id: Uuid, address: SocketAddr, websocket: WebSocket);

    ///
    /// Closes every realtime connection of the user
    ///
    async fn close_connections(&self, user_id: Uuid);
}
