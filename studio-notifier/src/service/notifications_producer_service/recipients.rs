use crate::dto::input::{DomainEvent, Party};
use uuid::Uuid;

///
/// Who should be told about a domain event
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipients {
    Administrators,
    ///
    /// Single administrator acting as the studio's counterpart
    ///
    AnyAdministrator,
    User(Uuid),
    Nobody,
}

pub fn resolve_recipients(event: &DomainEvent) -> Recipients {
    match event {
        DomainEvent::BookingCreated { .. } => Recipients::Administrators,
        DomainEvent::FileUploaded {
            client_id,
            uploaded_by: party,
            ..
        }
        | DomainEvent::MessageSent {
            client_id,
            sent_by: party,
            ..
        } => counterpart(*party, *client_id),
        DomainEvent::BookingStatusChanged { client_id, .. }
        | DomainEvent::ProjectCreated { client_id, .. }
        | DomainEvent::ProjectStatusChanged { client_id, .. }
        | DomainEvent::InvoiceSent { client_id, .. }
        | DomainEvent::PaymentReceived { client_id, .. }
        | DomainEvent::InvoicePaid { client_id, .. }
        | DomainEvent::PaymentFailed { client_id, .. } => Recipients::User(*client_id),
        DomainEvent::UserDeleted { .. } => Recipients::Nobody,
    }
}

fn counterpart(actor: Party, client_id: Uuid) -> Recipients {
    match actor {
        Party::Admin => Recipients::User(client_id),
        Party::Client => Recipients::AnyAdministrator,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dto::input::BookingStatus;

    #[test]
    fn booking_created_all_administrators() {
        let event = DomainEvent::BookingCreated {
            booking_id: Uuid::new_v4(),
        };

        assert_eq!(resolve_recipients(&event), Recipients::Administrators);
    }

    #[test]
    fn booking_status_changed_client() {
        let client_id = Uuid::new_v4();
        let event = DomainEvent::BookingStatusChanged {
            booking_id: Uuid::new_v4(),
            client_id,
            status: BookingStatus::Approved,
        };

        assert_eq!(resolve_recipients(&event), Recipients::User(client_id));
    }

    #[test]
    fn file_uploaded_by_admin_goes_to_client() {
        let client_id = Uuid::new_v4();
        let event = DomainEvent::FileUploaded {
            project_id: Uuid::new_v4(),
            client_id,
            uploaded_by: Party::Admin,
            file_name: "raw_footage.mov".to_string(),
        };

        assert_eq!(resolve_recipients(&event), Recipients::User(client_id));
    }

    #[test]
    fn message_sent_by_client_goes_to_administrator() {
        let event = DomainEvent::MessageSent {
            project_id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            project_name: "Spring Campaign".to_string(),
            sent_by: Party::Client,
        };

        assert_eq!(resolve_recipients(&event), Recipients::AnyAdministrator);
    }

    #[test]
    fn payment_failed_client() {
        let client_id = Uuid::new_v4();
        let event = DomainEvent::PaymentFailed {
            invoice_id: Uuid::new_v4(),
            client_id,
            project_name: "Spring Campaign".to_string(),
            invoice_number: "INV-0042".to_string(),
        };

        assert_eq!(resolve_recipients(&event), Recipients::User(client_id));
    }

    #[test]
    fn user_deleted_nobody() {
        let event = DomainEvent::UserDeleted {
            user_id: Uuid::new_v4(),
        };

        assert_eq!(resolve_recipients(&event), Recipients::Nobody);
    }
}
