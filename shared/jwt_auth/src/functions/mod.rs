mod require_all_roles;

pub use require_all_roles::*;
