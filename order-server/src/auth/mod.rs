//! Authentication and authorization
//!
//! Tokens are issued by the external identity service; this module only
//! validates them and checks permissions.
//!
//! - [`JwtService`] - token validation (and signing, for tooling and tests)
//! - [`CurrentUser`] - operator identity stamped on orders and payments
//! - [`require_auth`] - authentication middleware
//! - [`require_permission`] - per-route permission middleware

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod permissions;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_permission};
