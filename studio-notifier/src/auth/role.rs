//!
//! All roles used within application
//!

use strum::AsRefStr;

#[derive(AsRefStr)]
pub enum Role {
    ///
    /// Granted to portal backends that report domain events
    ///
    #[strum(serialize = "studio_notifier_produce_notifications")]
    ProduceNotifications,
}
