mod count;
mod notification;
mod realtime_frame;
mod realtime_ticket;

pub use count::*;
pub use notification::*;
pub use realtime_frame::*;
pub use realtime_ticket::*;
