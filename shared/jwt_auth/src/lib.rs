//!
//! Verification of JWTs issued by the studio portal's identity provider.
//!
//! Requests passing through [JwtAuthLayer] get a [User] in their extensions,
//! handlers receive it with the [User] extractor which rejects with
//! `401 Unauthorized` when no caller could be resolved.
//!

mod dto;
pub mod error;
mod functions;
mod middleware;
pub mod util;

pub use dto::User;
pub use functions::*;
pub use middleware::JwtAuthLayer;
