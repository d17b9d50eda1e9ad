use crate::error::UnauthenticatedError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::{ops::Deref, sync::Arc};
use uuid::Uuid;

///
/// Caller resolved from the JWT.
///
/// Fields live in [InnerUser] behind an Arc so cloning stays cheap,
/// they are reachable through Deref.
///
#[derive(Clone)]
pub struct User {
    inner: Arc<InnerUser>,
}

pub struct InnerUser {
    pub id: Uuid,
    pub roles: Vec<String>,
}

impl User {
    pub fn new(id: Uuid, roles: Vec<String>) -> Self {
        Self {
            inner: Arc::new(InnerUser { id, roles }),
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|user_role| user_role == role)
    }
}

impl Deref for User {
    type Target = InnerUser;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for User
where
    S: Send + Sync,
{
    type Rejection = UnauthenticatedError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .ok_or(UnauthenticatedError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use axum::http::{Request, StatusCode};
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn extractor_rejects_request_without_user() {
        let (mut parts, _) = Request::new(()).into_parts();

        let rejection = User::from_request_parts(&mut parts, &())
            .await
            .err()
            .unwrap();

        assert_eq!(rejection.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn extractor_returns_user_from_extensions() {
        let user_id = Uuid::from_u128(902183091283);
        let (mut parts, _) = Request::new(()).into_parts();
        parts.extensions.insert(User::new(user_id, vec![]));

        let user = User::from_request_parts(&mut parts, &()).await.unwrap();

        assert_eq!(user.id, user_id);
    }

    #[test]
    fn has_role() {
        let user = User::new(Uuid::new_v4(), vec!["studio_admin".to_string()]);

        assert!(user.has_role("studio_admin"));
        assert!(!user.has_role("studio_client"));
    }
}
