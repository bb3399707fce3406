//! # OfficeHub Auth
//!
//! Authentication and authorization primitives for the OfficeHub API.
//!
//! - [`role`]: the closed [`Role`] set and the pure [`authorize`] check
//! - [`claims`]: the token payload `{ subjectId, role, iat, exp }`
//! - [`jwt`]: token issuing and verification (HS256)
//!
//! Tokens are stateless. A token is valid iff its signature verifies with the
//! configured secret and the current time is strictly before `exp`.
//!
//! # Example
//!
//! ```ignore
//! use officehub_auth::{Role, issue_token, verify_token};
//! use officehub_config::JwtConfig;
//!
//! let issued = issue_token("65f1c0ffee0000000000abcd", Role::Employee, &config)?;
//! let claims = verify_token(&issued.token, &config)?;
//! assert_eq!(claims.role, Role::Employee);
//! ```

pub mod claims;
pub mod jwt;
pub mod role;

pub use claims::Claims;
pub use jwt::{IssuedToken, UNAUTHORIZED_MESSAGE, issue_token, issue_token_at, verify_token, verify_token_at};
pub use role::{ADMIN_ONLY, ALL_ROLES, Decision, Role, STAFF, UnknownRole, authorize};
