mod deleted_notifications;
mod new_notification;
mod notification;
mod notification_type;

pub use deleted_notifications::*;
pub use new_notification::*;
pub use notification::*;
pub use notification_type::*;
