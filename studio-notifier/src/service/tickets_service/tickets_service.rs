use crate::{
    dto::{input, output},
    error::Error,
};
use axum::async_trait;
use uuid::Uuid;

///
/// Exchange of a bearer token for a single-use ticket.
/// Browsers can't set headers of a websocket request,
/// the ticket travels in the query instead.
///
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketsService: Send + Sync {
    async fn issue(&self, user_id: Uuid) -> Result<output::RealtimeTicket, Error>;

    ///
    /// ### Returns
    /// Id of the user the ticket was issued to
    ///
    /// ### Errors
    /// - [Error::TicketInvalid] when ticket is unknown, used or expired
    ///
    async fn consume(&self, ticket: input::RealtimeTicket) -> Result<Uuid, Error>;
}
