use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RealtimeTicket {
    pub ticket: String,
}
