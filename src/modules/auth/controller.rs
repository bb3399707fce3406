use axum::{Json, extract::State, http::StatusCode};
use officehub_core::{ApiResponse, AppError, response::MessageResponse};
use officehub_models::{
    ChangePasswordRequest, LoginRequest, LoginResponse, PublicIdentity, RegisterRequest,
    UpdateProfileRequest,
};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register a new employee account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created and signed in", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LoginResponse>>), AppError> {
    let session = AuthService::register(state.identities.as_ref(), &state.jwt_config, dto).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(session))))
}

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse),
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let session = AuthService::login(state.identities.as_ref(), &state.jwt_config, dto).await?;
    Ok(Json(ApiResponse::ok(session)))
}

/// Current identity
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Signed-in identity", body = ApiResponse<PublicIdentity>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn get_me(user: AuthUser) -> Json<ApiResponse<PublicIdentity>> {
    Json(ApiResponse::ok(user.0))
}

/// Update own profile
#[utoipa::path(
    put,
    path = "/api/auth/me",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<PublicIdentity>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn update_me(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<PublicIdentity>>, AppError> {
    let updated = AuthService::update_profile(state.identities.as_ref(), user.id(), dto).await?;
    Ok(Json(ApiResponse::ok(updated)))
}

/// Change own password
#[utoipa::path(
    post,
    path = "/api/auth/me/password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = ApiResponse<MessageResponse>),
        (status = 400, description = "Validation failed or wrong current password", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(dto): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    AuthService::change_password(state.identities.as_ref(), user.id(), dto).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Password changed successfully",
    ))))
}
