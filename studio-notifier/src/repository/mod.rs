mod dto;
mod entity;
mod error;
mod notifications_repository;
mod notifications_repository_impl;
mod tickets_repository;
mod tickets_repository_impl;
mod users_repository;
mod users_repository_impl;

pub use dto::*;
pub use error::*;
pub use notifications_repository::*;
pub use notifications_repository_impl::*;
pub use tickets_repository::*;
pub use tickets_repository_impl::*;
pub use users_repository::*;
pub use users_repository_impl::*;
