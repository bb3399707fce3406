//! Database error mapping.

use anyhow::anyhow;
use officehub_core::AppError;

/// Wraps a database error as a 500.
pub fn map_db_error(err: sqlx::Error) -> AppError {
    AppError::database(err)
}

/// Turns a unique-constraint violation into a 409 with `message`; anything
/// else is a 500.
pub fn unique_violation_or(err: sqlx::Error, message: &'static str) -> AppError {
    let is_unique = err
        .as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation());

    if is_unique {
        AppError::conflict(anyhow!(message))
    } else {
        map_db_error(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_are_internal() {
        let err = unique_violation_or(sqlx::Error::RowNotFound, "duplicate");
        assert!(err.status.is_server_error());
        assert_ne!(err.public_message(), "duplicate");
    }
}
