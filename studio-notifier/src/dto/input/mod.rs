mod domain_event;
mod notification_filters;
mod pagination;
mod realtime_ticket;

pub use domain_event::*;
pub use notification_filters::*;
pub use pagination::*;
pub use realtime_ticket::*;
