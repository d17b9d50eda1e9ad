use serde::Deserialize;

///
/// Query of the realtime connection request
///
#[derive(Debug, Deserialize)]
pub struct RealtimeTicket {
    pub ticket: String,
}
