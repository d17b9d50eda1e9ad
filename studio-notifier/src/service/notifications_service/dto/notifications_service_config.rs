use std::time::Duration;

pub struct NotificationsServiceConfig {
    ///
    /// Upper bound of a single store operation
    ///
    pub operation_timeout: Duration,
}
