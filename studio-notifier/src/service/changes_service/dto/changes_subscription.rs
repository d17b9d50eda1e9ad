use super::NotificationChange;
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use uuid::Uuid;

///
/// Receiving end of one user's change feed.
/// Dropping the subscription releases it.
///
pub struct ChangesSubscription {
    user_id: Uuid,
    receiver: Option<broadcast::Receiver<Arc<NotificationChange>>>,
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl ChangesSubscription {
    pub fn new(
        user_id: Uuid,
        receiver: broadcast::Receiver<Arc<NotificationChange>>,
        release: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            user_id,
            receiver: Some(receiver),
            release: Some(Box::new(release)),
        }
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    ///
    /// ### Errors
    /// - [RecvError::Lagged] when subscriber was too slow and changes were dropped
    /// - [RecvError::Closed] when feed of the user was closed
    ///
    pub async fn recv(&mut self) -> Result<Arc<NotificationChange>, RecvError> {
        match self.receiver.as_mut() {
            Some(receiver) => receiver.recv().await,
            None => Err(RecvError::Closed),
        }
    }
}

impl Drop for ChangesSubscription {
    fn drop(&mut self) {
        // receiver has to be gone before release checks the receiver count
        drop(self.receiver.take());
        if let Some(release) = self.release.take() {
            release();
        }
    }
}
