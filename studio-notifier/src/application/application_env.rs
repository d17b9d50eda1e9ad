use anyhow::anyhow;
use jsonwebtoken::{Algorithm, DecodingKey};
use jwt_auth::util::{parse_jwt_algorithms, parse_jwt_key};
use std::{net::SocketAddr, time::Duration};

pub struct ApplicationEnv {
    pub log_directory: String,
    pub log_filename: String,

    pub bind_address: SocketAddr,

    pub db_connection_string: String,
    pub db_name: String,

    pub max_http_content_len: usize,

    /// Algorithms must belong to the same family
    pub jwt_algorithms: Vec<Algorithm>,
    pub jwt_key: DecodingKey,

    pub snapshot_limit: u32,
    pub operation_timeout: Duration,
    pub realtime_buffer_size: usize,
    pub websocket_ping_interval: Duration,
    pub realtime_ticket_lifespan: Duration,
}

impl ApplicationEnv {
    pub fn parse() -> anyhow::Result<Self> {
        let log_directory = Self::env_var("STUDIO_NOTIFIER_LOG_DIRECTORY")?;
        let log_filename = Self::env_var("STUDIO_NOTIFIER_LOG_FILENAME")?;
        let bind_address = Self::env_var("STUDIO_NOTIFIER_BIND_ADDRESS")?.parse()?;
        let db_connection_string = Self::env_var("STUDIO_NOTIFIER_DB_CONNECTION_STRING")?;
        let db_name = Self::env_var("STUDIO_NOTIFIER_DB_NAME")?;
        let max_http_content_len = Self::env_var("STUDIO_NOTIFIER_MAX_HTTP_CONTENT_LEN")?.parse()?;
        let jwt_algorithms = parse_jwt_algorithms(Self::env_var("STUDIO_NOTIFIER_JWT_ALGORITHMS")?)?;
        let jwt_algorithm = jwt_algorithms.first().ok_or(anyhow!(
            "STUDIO_NOTIFIER_JWT_ALGORITHMS need to contain at least one algorithm"
        ))?;
        let jwt_key = parse_jwt_key(jwt_algorithm, Self::env_var("STUDIO_NOTIFIER_JWT_KEY")?)?;
        let snapshot_limit = Self::env_var("STUDIO_NOTIFIER_SNAPSHOT_LIMIT")?.parse()?;
        if snapshot_limit == 0 {
            anyhow::bail!("STUDIO_NOTIFIER_SNAPSHOT_LIMIT must be greater than 0");
        }
        let operation_timeout = Self::env_var("STUDIO_NOTIFIER_OPERATION_TIMEOUT")?.parse()?;
        let operation_timeout = Duration::from_secs(operation_timeout);
        let realtime_buffer_size = Self::env_var("STUDIO_NOTIFIER_REALTIME_BUFFER_SIZE")?.parse()?;
        if realtime_buffer_size == 0 {
            anyhow::bail!("STUDIO_NOTIFIER_REALTIME_BUFFER_SIZE must be greater than 0");
        }
        let websocket_ping_interval =
            Self::env_var("STUDIO_NOTIFIER_WEBSOCKET_PING_INTERVAL")?.parse()?;
        let websocket_ping_interval = Duration::from_secs(websocket_ping_interval);
        let realtime_ticket_lifespan =
            Self::env_var("STUDIO_NOTIFIER_REALTIME_TICKET_LIFESPAN")?.parse()?;
        let realtime_ticket_lifespan = Duration::from_secs(realtime_ticket_lifespan);

        Ok(Self {
            log_directory,
            log_filename,
            bind_address,
            db_connection_string,
            db_name,
            max_http_content_len,
            jwt_algorithms,
            jwt_key,
            snapshot_limit,
            operation_timeout,
            realtime_buffer_size,
            websocket_ping_interval,
            realtime_ticket_lifespan,
        })
    }

    fn env_var(name: &'static str) -> anyhow::Result<String> {
        std::env::var(name).map_err(|_| anyhow!("environment variable {name} not set"))
    }
}
