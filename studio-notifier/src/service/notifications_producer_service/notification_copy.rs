//!
//! Texts of notifications shown to portal users
//!

use crate::{
    dto::input::{BookingStatus, DomainEvent, Party, ProjectStatus},
    repository::NotificationType,
};

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationCopy {
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
}

impl NotificationCopy {
    fn new(
        notification_type: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            notification_type,
            title: title.into(),
            message: message.into(),
            link: Some(link.into()),
        }
    }
}

///
/// ### Returns
/// Copy of the notification or None when event doesn't produce any
///
pub fn notification_copy(event: &DomainEvent) -> Option<NotificationCopy> {
    let copy = match event {
        DomainEvent::BookingCreated { .. } => NotificationCopy::new(
            NotificationType::BookingRequest,
            "New Booking Request",
            "A new booking request has been submitted",
            "/admin/bookings",
        ),
        DomainEvent::BookingStatusChanged { status, .. } => {
            let (title, message) = booking_status_copy(*status);
            NotificationCopy::new(NotificationType::BookingStatus, title, message, "/bookings")
        }
        DomainEvent::ProjectCreated {
            project_id,
            from_booking: true,
            ..
        } => NotificationCopy::new(
            NotificationType::ProjectCreated,
            "Project Created",
            "A new project has been created from your booking request",
            format!("/projects/{project_id}"),
        ),
        DomainEvent::ProjectCreated {
            project_id,
            project_name,
            ..
        } => NotificationCopy::new(
            NotificationType::ProjectCreated,
            "New Project Created",
            format!("A new project \"{project_name}\" has been created for you"),
            format!("/projects/{project_id}"),
        ),
        DomainEvent::ProjectStatusChanged {
            project_id,
            project_name,
            status: ProjectStatus::Delivered,
            ..
        } => NotificationCopy::new(
            NotificationType::ProjectDelivered,
            "Project Delivered",
            format!("Your project \"{project_name}\" has been delivered!"),
            format!("/projects/{project_id}"),
        ),
        DomainEvent::ProjectStatusChanged {
            project_id,
            project_name,
            status,
            ..
        } => NotificationCopy::new(
            NotificationType::ProjectStatus,
            "Project Status Update",
            format!("{project_name} {}", project_status_suffix(*status)),
            format!("/projects/{project_id}"),
        ),
        DomainEvent::FileUploaded {
            project_id,
            file_name,
            ..
        } => NotificationCopy::new(
            NotificationType::FileUploaded,
            "New File Uploaded",
            format!("A new file \"{file_name}\" has been uploaded"),
            format!("/projects/{project_id}"),
        ),
        DomainEvent::MessageSent {
            project_id,
            project_name,
            sent_by,
            ..
        } => {
            // Link leads to the recipient's side of the portal
            let link = match sent_by {
                Party::Admin => format!("/projects/{project_id}"),
                Party::Client => format!("/admin/projects/{project_id}"),
            };
            NotificationCopy::new(
                NotificationType::NewMessage,
                "New Message",
                format!("You have a new message on project \"{project_name}\""),
                link,
            )
        }
        DomainEvent::InvoiceSent {
            invoice_id,
            project_name,
            amount_cents,
            ..
        } => NotificationCopy::new(
            NotificationType::InvoiceSent,
            "New Invoice",
            format!(
                "You have a new invoice for {project_name} - {}",
                format_amount(*amount_cents)
            ),
            format!("/invoices/{invoice_id}"),
        ),
        DomainEvent::PaymentReceived {
            invoice_id,
            project_name,
            amount_cents,
            deposit,
            ..
        } => {
            let payment_type = match deposit {
                true => "deposit",
                false => "full payment",
            };
            NotificationCopy::new(
                NotificationType::PaymentReceived,
                format!("Payment Received - {project_name}"),
                format!(
                    "Your {payment_type} of {} has been processed successfully.",
                    format_amount(*amount_cents)
                ),
                format!("/invoices/{invoice_id}"),
            )
        }
        DomainEvent::InvoicePaid {
            invoice_id,
            project_name,
            invoice_number,
            ..
        } => NotificationCopy::new(
            NotificationType::PaymentReceived,
            format!("Invoice Paid - {project_name}"),
            format!("Your invoice {invoice_number} has been paid in full."),
            format!("/invoices/{invoice_id}"),
        ),
        DomainEvent::PaymentFailed {
            invoice_id,
            project_name,
            invoice_number,
            ..
        } => NotificationCopy::new(
            NotificationType::PaymentFailed,
            format!("Payment Failed - {project_name}"),
            format!(
                "Your payment for invoice {invoice_number} could not be processed. \
                 Please update your payment method."
            ),
            format!("/invoices/{invoice_id}"),
        ),
        DomainEvent::UserDeleted { .. } => return None,
    };

    Some(copy)
}

fn booking_status_copy(status: BookingStatus) -> (&'static str, &'static str) {
    match status {
        BookingStatus::Approved => (
            "Booking Approved",
            "Your booking request has been approved!",
        ),
        BookingStatus::Declined => (
            "Booking Declined",
            "Your booking request has been declined",
        ),
        BookingStatus::Reviewing => (
            "Booking Under Review",
            "Your booking request is being reviewed",
        ),
        BookingStatus::Pending | BookingStatus::Other => {
            ("Booking Update", "Your booking request has been updated")
        }
    }
}

fn project_status_suffix(status: ProjectStatus) -> &'static str {
    match status {
        ProjectStatus::PreProduction => "is now in pre-production",
        ProjectStatus::Shooting => "is now being shot",
        ProjectStatus::Editing => "is now in editing",
        ProjectStatus::Review => "is ready for your review",
        ProjectStatus::Delivered => "has been delivered!",
        ProjectStatus::Cancelled => "has been cancelled",
        ProjectStatus::Pending | ProjectStatus::Other => "has been updated",
    }
}

///
/// Formats amount in cents as dollars, e.g. `123450` -> `$1234.50`
///
pub fn format_amount(amount_cents: i64) -> String {
    let sign = if amount_cents < 0 { "-" } else { "" };
    let amount_cents = amount_cents.unsigned_abs();

    format!("{sign}${}.{:02}", amount_cents / 100, amount_cents % 100)
}
