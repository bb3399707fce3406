//! Identity persistence.

use std::str::FromStr;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use officehub_auth::Role;
use officehub_core::AppError;
use officehub_models::{Identity, IdentityQuery, NewIdentity, ObjectId, ProfileChanges};
use sqlx::{FromRow, PgPool};

use crate::errors::{map_db_error, unique_violation_or};

pub const DUPLICATE_EMAIL_MESSAGE: &str = "An account with this email already exists";

/// Lookup and mutation of identities.
///
/// Emails passed in are expected to be normalized (trimmed, lowercase).
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Identity>, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, AppError>;

    /// Fails with 409 when the email is taken.
    async fn create(&self, new: NewIdentity) -> Result<Identity, AppError>;

    async fn update_profile(
        &self,
        id: &ObjectId,
        changes: ProfileChanges,
    ) -> Result<Option<Identity>, AppError>;

    async fn update_password(&self, id: &ObjectId, password_hash: &str) -> Result<bool, AppError>;

    async fn set_role(&self, id: &ObjectId, role: Role) -> Result<Option<Identity>, AppError>;

    async fn set_active(&self, id: &ObjectId, is_active: bool)
    -> Result<Option<Identity>, AppError>;

    /// One page of identities plus the total matching count.
    async fn list(&self, query: &IdentityQuery) -> Result<(Vec<Identity>, i64), AppError>;
}

const IDENTITY_COLUMNS: &str = "id, name, email, password_hash, role::text AS role, department, \
     designation, phone, is_active, created_at, updated_at";

#[derive(FromRow)]
struct IdentityRow {
    id: ObjectId,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    department: Option<String>,
    designation: Option<String>,
    phone: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<IdentityRow> for Identity {
    type Error = AppError;

    fn try_from(row: IdentityRow) -> Result<Self, Self::Error> {
        let role = Role::from_str(&row.role).map_err(|err| AppError::internal(anyhow!(err)))?;
        Ok(Identity {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            role,
            department: row.department,
            designation: row.designation,
            phone: row.phone,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_identity(row: Option<IdentityRow>) -> Result<Option<Identity>, AppError> {
    row.map(Identity::try_from).transpose()
}

/// `%term%` with LIKE wildcards escaped.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[derive(Clone, Debug)]
pub struct PgIdentityStore {
    pool: PgPool,
}

impl PgIdentityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityStore for PgIdentityStore {
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Identity>, AppError> {
        let row = sqlx::query_as::<_, IdentityRow>(&format!(
            "SELECT {IDENTITY_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_identity(row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, AppError> {
        let row = sqlx::query_as::<_, IdentityRow>(&format!(
            "SELECT {IDENTITY_COLUMNS} FROM users WHERE lower(email) = lower($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_identity(row)
    }

    async fn create(&self, new: NewIdentity) -> Result<Identity, AppError> {
        let row = sqlx::query_as::<_, IdentityRow>(&format!(
            "INSERT INTO users (id, name, email, password_hash, role, department, designation, phone) \
             VALUES ($1, $2, $3, $4, $5::user_role, $6, $7, $8) \
             RETURNING {IDENTITY_COLUMNS}"
        ))
        .bind(ObjectId::new())
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.password_hash)
        .bind(new.role.as_str())
        .bind(&new.department)
        .bind(&new.designation)
        .bind(&new.phone)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| unique_violation_or(err, DUPLICATE_EMAIL_MESSAGE))?;

        Identity::try_from(row)
    }

    async fn update_profile(
        &self,
        id: &ObjectId,
        changes: ProfileChanges,
    ) -> Result<Option<Identity>, AppError> {
        let row = sqlx::query_as::<_, IdentityRow>(&format!(
            "UPDATE users SET \
                name = COALESCE($2, name), \
                department = COALESCE($3, department), \
                designation = COALESCE($4, designation), \
                phone = COALESCE($5, phone), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {IDENTITY_COLUMNS}"
        ))
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.department)
        .bind(&changes.designation)
        .bind(&changes.phone)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_identity(row)
    }

    async fn update_password(&self, id: &ObjectId, password_hash: &str) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(password_hash)
                .execute(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_role(&self, id: &ObjectId, role: Role) -> Result<Option<Identity>, AppError> {
        let row = sqlx::query_as::<_, IdentityRow>(&format!(
            "UPDATE users SET role = $2::user_role, updated_at = NOW() WHERE id = $1 \
             RETURNING {IDENTITY_COLUMNS}"
        ))
        .bind(id)
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_identity(row)
    }

    async fn set_active(
        &self,
        id: &ObjectId,
        is_active: bool,
    ) -> Result<Option<Identity>, AppError> {
        let row = sqlx::query_as::<_, IdentityRow>(&format!(
            "UPDATE users SET is_active = $2, updated_at = NOW() WHERE id = $1 \
             RETURNING {IDENTITY_COLUMNS}"
        ))
        .bind(id)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_identity(row)
    }

    async fn list(&self, query: &IdentityQuery) -> Result<(Vec<Identity>, i64), AppError> {
        let role = query.role.map(Role::as_str);
        let search = query.search.as_deref().map(like_pattern);
        let filter = "($1::text IS NULL OR role::text = $1) \
             AND ($2::text IS NULL OR name ILIKE $2 OR email ILIKE $2) \
             AND ($3 OR is_active)";

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM users WHERE {filter}"))
            .bind(role)
            .bind(&search)
            .bind(query.include_inactive)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let rows = sqlx::query_as::<_, IdentityRow>(&format!(
            "SELECT {IDENTITY_COLUMNS} FROM users WHERE {filter} \
             ORDER BY created_at DESC, id DESC LIMIT $4 OFFSET $5"
        ))
        .bind(role)
        .bind(&search)
        .bind(query.include_inactive)
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let identities = rows
            .into_iter()
            .map(Identity::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((identities, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("ada"), "%ada%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }
}
