use axum::{Json, extract::State, http::StatusCode};
use officehub_core::{ApiResponse, AppError, Paginated};
use officehub_models::{
    CreateUserRequest, PublicIdentity, UpdateRoleRequest, UpdateStatusRequest, UserFilterParams,
};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::middleware::role::{AdminUser, StaffUser};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::{PathId, ValidatedJson, ValidatedQuery};

/// List employees
#[utoipa::path(
    get,
    path = "/api/users",
    params(
        ("role" = Option<String>, Query, description = "Admin, Manager or Employee"),
        ("search" = Option<String>, Query, description = "Case-insensitive match on name or email"),
        ("includeInactive" = Option<bool>, Query, description = "Include deactivated accounts"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default: 20, max: 100)"),
    ),
    responses(
        (status = 200, description = "Page of employees", body = ApiResponse<Paginated<PublicIdentity>>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin or Manager role required", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn list_users(
    State(state): State<AppState>,
    user: StaffUser,
    ValidatedQuery(params): ValidatedQuery<UserFilterParams>,
) -> Result<Json<ApiResponse<Paginated<PublicIdentity>>>, AppError> {
    let page = UserService::list(state.identities.as_ref(), params).await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// Get an employee
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Employee", body = ApiResponse<PublicIdentity>),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 403, description = "Admin or Manager role required", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn get_user(
    State(state): State<AppState>,
    user: StaffUser,
    PathId(id): PathId,
) -> Result<Json<ApiResponse<PublicIdentity>>, AppError> {
    let found = UserService::get(state.identities.as_ref(), &id).await?;
    Ok(Json(ApiResponse::ok(found)))
}

/// Create an account with an explicit role
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<PublicIdentity>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn create_user(
    State(state): State<AppState>,
    user: AdminUser,
    ValidatedJson(dto): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PublicIdentity>>), AppError> {
    let created = UserService::create(state.identities.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created))))
}

/// Change an employee's role
#[utoipa::path(
    patch,
    path = "/api/users/{id}/role",
    params(("id" = String, Path, description = "User id")),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role changed", body = ApiResponse<PublicIdentity>),
        (status = 403, description = "Admin role required, or own account", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn update_user_role(
    State(state): State<AppState>,
    user: AdminUser,
    PathId(id): PathId,
    ValidatedJson(dto): ValidatedJson<UpdateRoleRequest>,
) -> Result<Json<ApiResponse<PublicIdentity>>, AppError> {
    let updated =
        UserService::update_role(state.identities.as_ref(), user.id(), &id, dto.role).await?;
    Ok(Json(ApiResponse::ok(updated)))
}

/// Activate or deactivate an employee
#[utoipa::path(
    patch,
    path = "/api/users/{id}/status",
    params(("id" = String, Path, description = "User id")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<PublicIdentity>),
        (status = 403, description = "Admin role required, or own account", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn update_user_status(
    State(state): State<AppState>,
    user: AdminUser,
    PathId(id): PathId,
    ValidatedJson(dto): ValidatedJson<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<PublicIdentity>>, AppError> {
    let updated =
        UserService::update_status(state.identities.as_ref(), user.id(), &id, dto.is_active)
            .await?;
    Ok(Json(ApiResponse::ok(updated)))
}
