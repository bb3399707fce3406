//! The request gate.
//!
//! Resolves `Authorization: Bearer <token>` into the signed-in identity:
//! verify signature and expiry, then exactly one lookup by id. The resolved
//! [`AuthUser`] is cached in request extensions so later extractors in the
//! same request reuse it.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use officehub_auth::{Role, UNAUTHORIZED_MESSAGE, verify_token};
use officehub_config::JwtConfig;
use officehub_core::AppError;
use officehub_db::IdentityStore;
use officehub_models::{ObjectId, PublicIdentity};

use crate::state::AppState;

/// The authenticated identity, without its password hash.
#[derive(Debug, Clone)]
pub struct AuthUser(pub PublicIdentity);

impl AuthUser {
    pub fn id(&self) -> &ObjectId {
        &self.0.id
    }

    pub fn role(&self) -> Role {
        self.0.role
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let user = authenticate(&parts.headers, state.identities.as_ref(), &state.jwt_config).await?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}

fn unauthorized() -> AppError {
    AppError::unauthorized(UNAUTHORIZED_MESSAGE)
}

/// Token from a `Bearer` authorization header; the scheme is case-insensitive.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Runs the gate against `headers`.
///
/// Without a bearer token no lookup happens. Bad signatures and expired
/// tokens are indistinguishable to the caller. Unknown and deactivated
/// subjects are rejected the same way.
pub async fn authenticate(
    headers: &HeaderMap,
    identities: &dyn IdentityStore,
    jwt_config: &JwtConfig,
) -> Result<AuthUser, AppError> {
    let Some(token) = bearer_token(headers) else {
        tracing::debug!("Rejected request without bearer token");
        return Err(unauthorized());
    };

    let claims = verify_token(token, jwt_config)?;

    let subject_id = ObjectId::parse(&claims.subject_id).map_err(|_| {
        tracing::debug!("Rejected token with malformed subject id");
        unauthorized()
    })?;

    match identities.find_by_id(&subject_id).await? {
        Some(identity) if identity.is_active => Ok(AuthUser(identity.into())),
        Some(_) => {
            tracing::debug!(subject_id = %subject_id, "Rejected token for deactivated identity");
            Err(unauthorized())
        }
        None => {
            tracing::debug!(subject_id = %subject_id, "Rejected token for unknown identity");
            Err(unauthorized())
        }
    }
}
