//! # OfficeHub CLI
//!
//! Administrative commands that must not be reachable over HTTP.
//!
//! - [`admin`]: bootstrap an Admin account
//! - [`seeder`]: bulk-insert fake employees for development
//!
//! ```ignore
//! use officehub_cli::seeder::seed_employees;
//!
//! let inserted = seed_employees(&pool, 50, 5, "Welcome123").await?;
//! ```

pub mod admin;
pub mod seeder;
