use bson::Uuid;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct TicketFindEntity {
    pub user_id: Uuid,
}
