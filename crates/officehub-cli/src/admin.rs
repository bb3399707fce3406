//! Admin bootstrap. Public registration only creates Employees, so the
//! first Admin comes from here.

use officehub_auth::Role;
use officehub_core::{AppError, hash_password};
use officehub_db::IdentityStore;
use officehub_models::{CreateUserRequest, NewIdentity, PublicIdentity, Schema};
use validator::{Validate, ValidationErrors};

#[derive(Debug, Clone)]
pub struct AdminInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Normalizes and validates with the same rules as `POST /api/users`.
/// Errors are `field: message` lines.
pub fn prepare_admin(input: AdminInput) -> Result<CreateUserRequest, Vec<String>> {
    let mut request = CreateUserRequest {
        name: input.name,
        email: input.email,
        password: input.password,
        role: Role::Admin,
        department: None,
        designation: Some("Administrator".to_string()),
        phone: None,
    };

    request.normalize();
    request.validate().map_err(|e| describe(&e))?;
    request.refine().map_err(|e| describe(&e))?;
    Ok(request)
}

fn describe(errors: &ValidationErrors) -> Vec<String> {
    let mut lines: Vec<String> = errors
        .field_errors()
        .iter()
        .filter_map(|(field, errors)| {
            let error = errors.first()?;
            let message = error
                .message
                .as_deref()
                .map(str::to_string)
                .unwrap_or_else(|| error.code.to_string());
            Some(format!("{field}: {message}"))
        })
        .collect();
    lines.sort();
    lines
}

pub async fn create_admin(
    identities: &dyn IdentityStore,
    request: CreateUserRequest,
) -> Result<PublicIdentity, AppError> {
    let password_hash = hash_password(&request.password)?;

    let identity = identities
        .create(NewIdentity {
            name: request.name,
            email: request.email,
            password_hash,
            role: Role::Admin,
            department: request.department,
            designation: request.designation,
            phone: request.phone,
        })
        .await?;

    Ok(identity.into())
}
