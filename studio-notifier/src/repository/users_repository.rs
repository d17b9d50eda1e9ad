use super::Error;
use axum::async_trait;
use uuid::Uuid;

///
/// Read only access to portal accounts
///
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersRepository: Send + Sync {
    ///
    /// Finds ids of all users with administrator role
    ///
    async fn find_admin_ids(&self) -> Result<Vec<Uuid>, Error>;

    ///
    /// Finds one administrator, the one with the lowest id
    ///
    async fn find_first_admin_id(&self) -> Result<Option<Uuid>, Error>;
}
