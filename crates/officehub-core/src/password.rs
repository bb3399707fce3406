//! Password hashing backed by bcrypt.

use anyhow::Context;
use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .context("Failed to hash password")
        .map_err(AppError::internal)
}

/// Hashes with an explicit cost. Seeders use a low cost to stay fast.
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost)
        .context("Failed to hash password")
        .map_err(AppError::internal)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .context("Failed to verify password")
        .map_err(AppError::internal)
}
