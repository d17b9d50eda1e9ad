use super::NotificationsMirror;
use tokio::{sync::watch, task::JoinHandle};
use uuid::Uuid;

///
/// Active bridge of one user. Dropping the handle stops the bridge
/// and releases its changes subscription.
///
pub struct BridgeHandle {
    user_id: Uuid,
    state: watch::Receiver<NotificationsMirror>,
    task: JoinHandle<()>,
}

impl BridgeHandle {
    pub(crate) fn new(
        user_id: Uuid,
        state: watch::Receiver<NotificationsMirror>,
        task: JoinHandle<()>,
    ) -> Self {
        Self {
            user_id,
            state,
            task,
        }
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    ///
    /// Current state of the mirror
    ///
    pub fn state(&self) -> NotificationsMirror {
        self.state.borrow().clone()
    }

    ///
    /// Waits until state of the mirror changes.
    ///
    /// ### Returns
    /// false when bridge stopped and no more changes will come
    ///
    pub async fn changed(&mut self) -> bool {
        self.state.changed().await.is_ok()
    }

    ///
    /// Stops the bridge and waits until its subscription is released
    ///
    pub async fn close(mut self) {
        self.task.abort();
        let _ = (&mut self.task).await;
    }
}

impl Drop for BridgeHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
