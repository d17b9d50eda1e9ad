use std::time::Duration;

pub struct WebSocketsServiceConfig {
    pub ping_interval: Duration,
}
