mod bridge_handle;
mod dto;
mod notifications_mirror;
mod realtime_bridge;

pub use bridge_handle::*;
pub use dto::RealtimeBridgeConfig;
pub use notifications_mirror::*;
pub use realtime_bridge::*;
