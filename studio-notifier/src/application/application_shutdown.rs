use super::ApplicationStateToClose;

///
/// Releases resources that outlive the server
///
pub async fn close(state: ApplicationStateToClose) {
    tracing::info!("closing connection with database");
    state.db_client.shutdown().await;
    tracing::info!("database connection closed");
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        _ = ctrl_c => "ctrl_c",
        _ = terminate => "terminate",
    };

    tracing::info!(signal, "starting shutdown");
}
