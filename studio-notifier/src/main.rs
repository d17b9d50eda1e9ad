use std::net::SocketAddr;
use studio_notifier::application::{self, ApplicationEnv};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    #[cfg(debug_assertions)]
    {
        // Ignore error because .env file is not required
        // as long as env variables are set
        let _ = dotenvy::dotenv();
    }

    let env = ApplicationEnv::parse()?;

    application::setup_tracing(&env)?;

    let (state, state_to_close) = application::create_state(&env).await?;
    let middleware = application::create_middleware(&env);
    let app = application::create_application(state, middleware);

    tracing::info!("listening on {}", env.bind_address);
    let listener = TcpListener::bind(env.bind_address).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(application::shutdown_signal())
    .await?;

    application::close(state_to_close).await;

    Ok(())
}
