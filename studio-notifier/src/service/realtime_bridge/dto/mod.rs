mod realtime_bridge_config;

pub use realtime_bridge_config::*;
