mod broadcast_changes_service;
mod changes_service;
mod dto;

pub use broadcast_changes_service::*;
pub use changes_service::*;
pub use dto::*;
