use super::jwt_auth_service::JwtAuthService;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use std::sync::Arc;
use tower::Layer;

///
/// Layer that validates JWT in the Authorization header.
/// Requests without a valid token are answered with `401 Unauthorized`,
/// valid ones get a [crate::User] inserted into request extensions.
///
#[derive(Clone)]
pub struct JwtAuthLayer {
    validation: Arc<Validation>,
    key: Arc<DecodingKey>,
}

impl JwtAuthLayer {
    pub fn new(key: DecodingKey, algorithms: Vec<Algorithm>) -> Self {
        let mut validation = Validation::default();
        validation.algorithms = algorithms;

        Self {
            validation: Arc::new(validation),
            key: Arc::new(key),
        }
    }
}

impl<S> Layer<S> for JwtAuthLayer {
    type Service = JwtAuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        JwtAuthService::new(inner, self.validation.clone(), self.key.clone())
    }
}
