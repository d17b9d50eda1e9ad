mod notification_copy;
mod notifications_producer_service;
mod notifications_producer_service_impl;
mod recipients;

pub use notifications_producer_service::*;
pub use notifications_producer_service_impl::*;
