mod changes_service_config;
mod changes_subscription;
mod notification_change;

pub use changes_service_config::*;
pub use changes_subscription::*;
pub use notification_change::*;
