pub mod changes_service;
pub mod notifications_producer_service;
pub mod notifications_service;
pub mod realtime_bridge;
pub mod tickets_service;
pub mod websockets_service;

pub use realtime_bridge::NotificationsMirror;
