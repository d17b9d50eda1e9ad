mod notification_find_entity;
mod notification_insert_entity;
mod ticket_find_entity;
mod ticket_insert_entity;
mod user_find_entity;

pub use notification_find_entity::*;
pub use notification_insert_entity::*;
pub use ticket_find_entity::*;
pub use ticket_insert_entity::*;
pub use user_find_entity::*;
