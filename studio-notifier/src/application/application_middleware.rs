use super::ApplicationEnv;
use jwt_auth::JwtAuthLayer;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

pub struct ApplicationMiddleware {
    pub auth: JwtAuthLayer,
    pub body_limit: RequestBodyLimitLayer,
    pub trace: TraceLayer<SharedClassifier<ServerErrorsAsFailures>>,
}

pub fn create_middleware(env: &ApplicationEnv) -> ApplicationMiddleware {
    let auth = JwtAuthLayer::new(env.jwt_key.clone(), env.jwt_algorithms.clone());

    let body_limit = RequestBodyLimitLayer::new(env.max_http_content_len);

    let trace = TraceLayer::new_for_http();

    ApplicationMiddleware {
        auth,
        body_limit,
        trace,
    }
}
