use super::{error::Error, heartbeat::Heartbeat, WebSocketsServiceConfig};
use crate::{dto::output::RealtimeFrame, service::realtime_bridge::BridgeHandle};
use anyhow::anyhow;
use axum::extract::ws::Message;
use futures::{Sink, SinkExt, Stream, StreamExt};
use std::{fmt::Display, net::SocketAddr, sync::Arc};
use time::OffsetDateTime;
use tokio::time::sleep_until;
use uuid::Uuid;

///
/// Streams mirror of user's notifications to a single websocket
///
pub struct WebSocketConnection<WebSocketSink, WebSocketStream> {
    user_id: Uuid,
    user_address: SocketAddr,

    bridge: BridgeHandle,
    ws_tx: WebSocketSink,
    ws_rx: WebSocketStream,

    heartbeat: Heartbeat,
}

impl<WebSocketSink, WebSocketStream, SinkError, StreamError>
    WebSocketConnection<WebSocketSink, WebSocketStream>
where
    WebSocketSink: Sink<Message, Error = SinkError> + Unpin,
    WebSocketStream: Stream<Item = Result<Message, StreamError>> + Unpin,
    SinkError: Display,
    StreamError: Display,
{
    pub fn new(
        config: Arc<WebSocketsServiceConfig>,
        user_id: Uuid,
        user_address: SocketAddr,
        bridge: BridgeHandle,
        ws_tx: WebSocketSink,
        ws_rx: WebSocketStream,
    ) -> Self {
        Self {
            user_id,
            user_address,
            bridge,
            ws_tx,
            ws_rx,
            heartbeat: Heartbeat::new(config.ping_interval),
        }
    }

    #[tracing::instrument(
        name = "WebSocket",
        skip_all,
        fields(
            user_id = %self.user_id,
            address = %self.user_address,
        )
    )]
    pub async fn run(mut self) {
        match self.try_run().await {
            Ok(()) => (),
            Err(Error::Close(message)) => {
                tracing::info!("closing connection: {message}");
            }
            Err(Error::Anyhow(err)) => {
                tracing::warn!("{err}");
            }
        }

        tracing::info!("closing websocket");
        match self.ws_tx.close().await {
            Ok(()) => tracing::info!("websocket closed"),
            Err(err) => tracing::warn!(%err, "failed to close websocket"),
        }
    }

    async fn try_run(&mut self) -> Result<(), Error> {
        self.send_frame().await?;

        loop {
            tokio::select! {
                biased;

                _ = sleep_until(self.heartbeat.deadline()) => {
                    self.process_ping().await?;
                }

                message = self.ws_rx.next() => {
                    self.process_incomming_message(message)?;
                }

                changed = self.bridge.changed() => {
                    if !changed {
                        return Err(Error::Close("realtime feed closed"));
                    }
                    self.send_frame().await?;
                }
            }
        }
    }

    async fn send_frame(&mut self) -> anyhow::Result<()> {
        let state = self.bridge.state();
        let frame = RealtimeFrame::new(&state, OffsetDateTime::now_utc());
        let payload = serde_json::to_string(&frame)
            .map_err(|err| anyhow!("failed to serialize frame: {err}"))?;

        self.ws_tx
            .send(Message::Text(payload))
            .await
            .map_err(|err| anyhow!("sending frame failed: {err}"))?;
        tracing::debug!(
            count = frame.notifications.len(),
            unread_count = frame.unread_count,
            "sent frame"
        );

        Ok(())
    }

    async fn process_ping(&mut self) -> anyhow::Result<()> {
        let payload = self.heartbeat.ping()?;

        self.ws_tx
            .send(Message::Ping(payload))
            .await
            .map_err(|err| anyhow!("failed to send ping: {err}"))?;
        tracing::trace!("ping sent");

        Ok(())
    }

    fn process_incomming_message(
        &mut self,
        message: Option<Result<Message, StreamError>>,
    ) -> Result<(), Error> {
        match message {
            Some(Ok(Message::Text(_))) | Some(Ok(Message::Binary(_))) => {
                return Err(Error::Anyhow(anyhow!("received unsupported data message")));
            }
            Some(Ok(Message::Ping(_))) => tracing::trace!("processed ping message"),
            Some(Ok(Message::Pong(payload))) => {
                self.heartbeat.pong(&payload)?;
                tracing::trace!("processed pong message");
            }
            Some(Ok(Message::Close(_))) => {
                return Err(Error::Close("received close message"));
            }
            Some(Err(err)) => {
                return Err(Error::Anyhow(anyhow!(
                    "failed to read incomming message: {err}"
                )));
            }
            None => return Err(Error::Anyhow(anyhow!("incomming messages stream closed"))),
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        repository::{Notification, NotificationType},
        service::realtime_bridge::NotificationsMirror,
    };
    use bson::oid::ObjectId;
    use serde_json::Value;
    use std::time::Duration;
    use tokio::{sync::watch, time::timeout};

    #[tokio::test]
    async fn initial_frame_sent_on_connect() {
        let user_id = Uuid::new_v4();
        let mirror = NotificationsMirror::new(vec![create_notification(user_id)], 4, 10);

        let (_handle, _ws_tx, mut ws_rx, _state_tx) =
            start_test_connection(create_test_config(), mirror);

        let frame = read_frame(&mut ws_rx).await;

        assert_eq!(frame["unread_count"], 4);
        assert_eq!(frame["notifications"].as_array().unwrap().len(), 1);
        assert_eq!(frame["notifications"][0]["title"], "Payment Failed - Spring Campaign");
    }

    #[tokio::test]
    async fn frame_sent_after_mirror_change() {
        let user_id = Uuid::new_v4();

        let (_handle, _ws_tx, mut ws_rx, state_tx) =
            start_test_connection(create_test_config(), NotificationsMirror::empty(10));

        let frame = read_frame(&mut ws_rx).await;
        assert_eq!(frame["unread_count"], 0);

        state_tx.send_replace(NotificationsMirror::new(
            vec![create_notification(user_id), create_notification(user_id)],
            2,
            10,
        ));

        let frame = read_frame(&mut ws_rx).await;
        assert_eq!(frame["unread_count"], 2);
        assert_eq!(frame["notifications"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn bridge_stopped_connection_closed() {
        let (handle, _ws_tx, mut ws_rx, state_tx) =
            start_test_connection(create_test_config(), NotificationsMirror::empty(10));

        read_frame(&mut ws_rx).await;
        drop(state_tx);

        timeout(Duration::from_secs(1), handle)
            .await
            .unwrap() // timeout
            .unwrap();
    }

    #[tokio::test]
    async fn ping_is_sent_after_interval() {
        let time_begin = OffsetDateTime::now_utc();
        let ping_interval = Duration::from_millis(50);

        let mut config = create_test_config();
        config.ping_interval = ping_interval;

        let (_handle, _ws_tx, mut ws_rx, _state_tx) =
            start_test_connection(config, NotificationsMirror::empty(10));

        read_frame(&mut ws_rx).await;
        let message = timeout(Duration::from_secs(1), ws_rx.next())
            .await
            .unwrap() // timeout
            .unwrap(); // message

        assert!(matches!(message, Message::Ping(_)));

        let time_now = OffsetDateTime::now_utc();
        assert!(time_now >= time_begin + ping_interval);
    }

    #[tokio::test]
    async fn ping_user_unresponsive() {
        let time_begin = OffsetDateTime::now_utc();
        let ping_interval = Duration::from_millis(50);

        let mut config = create_test_config();
        config.ping_interval = ping_interval;

        let (handle, _ws_tx, mut ws_rx, _state_tx) =
            start_test_connection(config, NotificationsMirror::empty(10));

        read_frame(&mut ws_rx).await;
        for _ in 1..=2 {
            let message = timeout(Duration::from_secs(1), ws_rx.next())
                .await
                .unwrap() // timeout
                .unwrap(); // message
            assert!(matches!(message, Message::Ping(_)));
        }

        timeout(Duration::from_secs(1), handle)
            .await
            .unwrap() // timeout
            .unwrap(); // handle should never panic

        let time_now = OffsetDateTime::now_utc();
        assert!(time_now >= time_begin + (ping_interval * 3));
    }

    #[tokio::test]
    async fn websocket_connection_closed() {
        let mut config = create_test_config();
        config.ping_interval = Duration::from_millis(50);

        let (handle, _ws_tx, ws_rx, _state_tx) =
            start_test_connection(config, NotificationsMirror::empty(10));

        // drop websocket to close connection
        drop(ws_rx);

        timeout(Duration::from_secs(1), handle)
            .await
            .unwrap() // timeout
            .unwrap();
    }

    #[tokio::test]
    async fn response_channel_closed() {
        let (handle, mut ws_tx, _ws_rx, _state_tx) =
            start_test_connection(create_test_config(), NotificationsMirror::empty(10));

        ws_tx.close().await.unwrap();

        timeout(Duration::from_secs(1), handle)
            .await
            .unwrap() // timeout
            .unwrap();
    }

    #[tokio::test]
    async fn client_input_ends_connection() {
        let inputs = [
            Ok(Message::Text("mark everything read".to_string())),
            Ok(Message::Binary(vec![0x01])),
            Ok(Message::Close(None)),
            Err(axum::Error::new("unexpected read error")),
        ];

        for input in inputs {
            let (handle, mut ws_tx, _ws_rx, _state_tx) =
                start_test_connection(create_test_config(), NotificationsMirror::empty(10));

            ws_tx.send(input).await.unwrap();

            timeout(Duration::from_secs(1), handle)
                .await
                .unwrap() // timeout
                .unwrap();
        }
    }

    async fn read_frame(ws_rx: &mut futures::channel::mpsc::UnboundedReceiver<Message>) -> Value {
        let message = timeout(Duration::from_secs(1), ws_rx.next())
            .await
            .unwrap() // timeout
            .unwrap(); // message
        let Message::Text(payload) = message else {
            panic!("invalid message type");
        };

        serde_json::from_str(&payload).unwrap()
    }

    ///
    /// Creates config that won't interfere with tests
    ///
    fn create_test_config() -> WebSocketsServiceConfig {
        WebSocketsServiceConfig {
            ping_interval: Duration::from_secs(1200),
        }
    }

    ///
    /// Starts task with connection.
    ///
    /// ### returns
    /// - task handle
    /// - ws_client_tx - client side send channel
    /// - ws_client_rx - client side read channel
    /// - state_tx - channel to publish new states of the mirror
    ///
    fn start_test_connection(
        config: WebSocketsServiceConfig,
        mirror: NotificationsMirror,
    ) -> (
        tokio::task::JoinHandle<()>,
        futures::channel::mpsc::UnboundedSender<Result<Message, axum::Error>>,
        futures::channel::mpsc::UnboundedReceiver<Message>,
        watch::Sender<NotificationsMirror>,
    ) {
        let (ws_server_tx, ws_client_rx) = futures::channel::mpsc::unbounded();
        let (ws_client_tx, ws_server_rx) = futures::channel::mpsc::unbounded();
        let (state_tx, state_rx) = watch::channel(mirror);

        let user_id = Uuid::new_v4();
        let bridge = BridgeHandle::new(user_id, state_rx, tokio::spawn(async {}));

        let ws_connection = WebSocketConnection::new(
            Arc::new(config),
            user_id,
            "0.0.0.0:1234".parse().unwrap(),
            bridge,
            ws_server_tx,
            ws_server_rx,
        );

        let handle = tokio::spawn(ws_connection.run());

        (handle, ws_client_tx, ws_client_rx, state_tx)
    }

    fn create_notification(user_id: Uuid) -> Notification {
        Notification {
            id: ObjectId::new(),
            user_id,
            notification_type: NotificationType::PaymentFailed,
            title: "Payment Failed - Spring Campaign".to_string(),
            message: "Your payment for invoice INV-0042 could not be processed. \
                      Please update your payment method."
                .to_string(),
            link: Some("/invoices/1".to_string()),
            read_at: None,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}
