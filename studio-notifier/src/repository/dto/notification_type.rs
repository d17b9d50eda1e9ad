use serde::{Deserialize, Serialize};

///
/// Domain event that caused the notification
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    BookingRequest,
    BookingStatus,
    ProjectCreated,
    ProjectStatus,
    ProjectDelivered,
    FileUploaded,
    NewMessage,
    InvoiceSent,
    PaymentReceived,
    PaymentFailed,
}
