use serde::Deserialize;
use uuid::Uuid;

///
/// Side of the portal that performed an action
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Party {
    Admin,
    Client,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Reviewing,
    Approved,
    Declined,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Pending,
    PreProduction,
    Shooting,
    Editing,
    Review,
    Delivered,
    Cancelled,
    #[serde(other)]
    Other,
}

///
/// Action committed somewhere in the portal that users should be told about
///
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    BookingCreated {
        booking_id: Uuid,
    },
    BookingStatusChanged {
        booking_id: Uuid,
        client_id: Uuid,
        status: BookingStatus,
    },
    ProjectCreated {
        project_id: Uuid,
        client_id: Uuid,
        project_name: String,
        /// Project converted from client's booking request
        #[serde(default)]
        from_booking: bool,
    },
    ProjectStatusChanged {
        project_id: Uuid,
        client_id: Uuid,
        project_name: String,
        status: ProjectStatus,
    },
    FileUploaded {
        project_id: Uuid,
        client_id: Uuid,
        uploaded_by: Party,
        file_name: String,
    },
    MessageSent {
        project_id: Uuid,
        client_id: Uuid,
        project_name: String,
        sent_by: Party,
    },
    InvoiceSent {
        invoice_id: Uuid,
        client_id: Uuid,
        project_name: String,
        amount_cents: i64,
    },
    PaymentReceived {
        invoice_id: Uuid,
        client_id: Uuid,
        project_name: String,
        amount_cents: i64,
        deposit: bool,
    },
    InvoicePaid {
        invoice_id: Uuid,
        client_id: Uuid,
        project_name: String,
        invoice_number: String,
    },
    PaymentFailed {
        invoice_id: Uuid,
        client_id: Uuid,
        project_name: String,
        invoice_number: String,
    },
    UserDeleted {
        user_id: Uuid,
    },
}
