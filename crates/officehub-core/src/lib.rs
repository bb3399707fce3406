//! # OfficeHub Core
//!
//! Core types, errors, and utilities for the OfficeHub API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`response`]: Success envelope shared by every endpoint
//! - [`pagination`]: Page-based pagination parameters and metadata
//! - [`password`]: bcrypt password hashing and verification
//! - [`serde`]: Lenient deserializers used to coerce form payloads
//!
//! # Example
//!
//! ```ignore
//! use officehub_core::{AppError, ApiResponse, hash_password};
//!
//! let hash = hash_password("correct horse battery staple")?;
//! let err = AppError::not_found(anyhow::anyhow!("Project not found"));
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod response;
pub mod serde;

pub use errors::{AppError, FieldError};
pub use pagination::{Paginated, PaginationMeta, PaginationParams};
pub use password::{hash_password, verify_password};
pub use response::ApiResponse;
