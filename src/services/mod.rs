pub mod auth;
pub mod authz;

pub use auth::{AuthService, Claims};
pub use authz::{require_member, require_role};
