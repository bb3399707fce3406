//! Role-based authorization.
//!
//! Two ways to guard a route, both backed by [`officehub_auth::authorize`]:
//!
//! 1. Extractor: a handler argument of type [`Authorized<P>`] (or one of the
//!    aliases [`AnyUser`], [`StaffUser`], [`AdminUser`]).
//! 2. Layer: [`require_staff`] via
//!    `axum::middleware::from_fn_with_state` for whole routers.
//!
//! An unauthenticated request fails with 401 before the role check; a denied
//! role fails with 403.

use std::marker::PhantomData;
use std::ops::Deref;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use officehub_auth::{ADMIN_ONLY, ALL_ROLES, Decision, Role, STAFF, authorize};
use officehub_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub const FORBIDDEN_MESSAGE: &str = "You do not have permission to perform this action";

/// A named set of roles allowed through a guard.
pub trait RolePolicy: Send + Sync + 'static {
    const ALLOWED: &'static [Role];
}

macro_rules! role_policy {
    ($(#[$meta:meta])* $name:ident => $allowed:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl RolePolicy for $name {
            const ALLOWED: &'static [Role] = $allowed;
        }
    };
}

role_policy!(
    /// Any signed-in identity.
    AnyRole => ALL_ROLES
);
role_policy!(
    /// Admins and managers.
    Staff => STAFF
);
role_policy!(AdminOnly => ADMIN_ONLY);

pub type AnyUser = Authorized<AnyRole>;
pub type StaffUser = Authorized<Staff>;
pub type AdminUser = Authorized<AdminOnly>;

/// Deny maps to 403.
pub fn ensure_role(role: Option<Role>, allowed: &[Role]) -> Result<(), AppError> {
    match authorize(role, allowed) {
        Decision::Permit => Ok(()),
        Decision::Deny => Err(AppError::forbidden(FORBIDDEN_MESSAGE)),
    }
}

/// An [`AuthUser`] whose role satisfies `P`.
#[derive(Debug, Clone)]
pub struct Authorized<P: RolePolicy>(pub AuthUser, PhantomData<P>);

impl<P: RolePolicy> Authorized<P> {
    pub fn into_inner(self) -> AuthUser {
        self.0
    }
}

impl<P: RolePolicy> Deref for Authorized<P> {
    type Target = AuthUser;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<P: RolePolicy> FromRequestParts<AppState> for Authorized<P> {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if let Err(err) = ensure_role(Some(user.role()), P::ALLOWED) {
            tracing::debug!(
                user_id = %user.id(),
                role = %user.role(),
                allowed = ?P::ALLOWED,
                "Role check denied"
            );
            return Err(err);
        }
        Ok(Self(user, PhantomData))
    }
}

/// Authenticates, checks the role and forwards the request with the resolved
/// identity cached in its extensions.
pub async fn require_roles(
    state: &AppState,
    req: Request,
    next: Next,
    allowed: &'static [Role],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, state).await?;
    ensure_role(Some(user.role()), allowed)?;

    Ok(next.run(Request::from_parts(parts, body)).await)
}

pub async fn require_staff(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(&state, req, next, STAFF).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_role_without_identity_is_forbidden() {
        let err = ensure_role(None, ALL_ROLES).unwrap_err();
        assert_eq!(err.status.as_u16(), 403);
    }

    #[test]
    fn test_policies() {
        assert!(ensure_role(Some(Role::Employee), AnyRole::ALLOWED).is_ok());
        assert!(ensure_role(Some(Role::Employee), Staff::ALLOWED).is_err());
        assert!(ensure_role(Some(Role::Manager), Staff::ALLOWED).is_ok());
        assert!(ensure_role(Some(Role::Manager), AdminOnly::ALLOWED).is_err());
        assert!(ensure_role(Some(Role::Admin), AdminOnly::ALLOWED).is_ok());
    }
}
