use super::Error;
use axum::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

///
/// Short-lived tickets that open realtime connections
///
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketsRepository: Send + Sync {
    async fn insert(
        &self,
        ticket: &str,
        user_id: Uuid,
        issued_at: OffsetDateTime,
        expire_at: OffsetDateTime,
    ) -> Result<(), Error>;

    ///
    /// Removes the ticket so it can't be used twice.
    ///
    /// ### Returns
    /// Owner of the ticket or None when
    ///     - ticket does not exist
    ///     - ticket was already used
    ///     - ticket expired before `now`
    ///
    async fn consume(&self, ticket: &str, now: OffsetDateTime) -> Result<Option<Uuid>, Error>;
}
