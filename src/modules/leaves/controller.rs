use axum::{Json, extract::State, http::StatusCode};
use officehub_core::{ApiResponse, AppError, Paginated};
use officehub_models::{CreateLeaveRequest, Leave, LeaveFilterParams, ReviewLeaveRequest};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::middleware::role::{AnyUser, StaffUser};
use crate::modules::leaves::service::LeaveService;
use crate::state::AppState;
use crate::validator::{PathId, ValidatedJson, ValidatedQuery};

/// Request leave
#[utoipa::path(
    post,
    path = "/api/leaves",
    request_body = CreateLeaveRequest,
    responses(
        (status = 201, description = "Leave requested", body = ApiResponse<Leave>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Leaves"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn create_leave(
    State(state): State<AppState>,
    user: AnyUser,
    ValidatedJson(dto): ValidatedJson<CreateLeaveRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Leave>>), AppError> {
    let leave = LeaveService::create(&state.db, user.id(), dto).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(leave))))
}

/// My leave requests
#[utoipa::path(
    get,
    path = "/api/leaves/mine",
    params(
        ("status" = Option<String>, Query, description = "Pending, Approved or Rejected"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default: 20, max: 100)"),
    ),
    responses(
        (status = 200, description = "Caller's leave requests", body = ApiResponse<Paginated<Leave>>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Leaves"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn list_my_leaves(
    State(state): State<AppState>,
    user: AnyUser,
    ValidatedQuery(mut params): ValidatedQuery<LeaveFilterParams>,
) -> Result<Json<ApiResponse<Paginated<Leave>>>, AppError> {
    params.employee_id = Some(user.id().to_string());
    let page = LeaveService::list(&state.db, params).await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// All leave requests
#[utoipa::path(
    get,
    path = "/api/leaves",
    params(
        ("status" = Option<String>, Query, description = "Pending, Approved or Rejected"),
        ("employeeId" = Option<String>, Query, description = "Only this employee"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default: 20, max: 100)"),
    ),
    responses(
        (status = 200, description = "Leave requests", body = ApiResponse<Paginated<Leave>>),
        (status = 403, description = "Admin or Manager role required", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Leaves"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn list_leaves(
    State(state): State<AppState>,
    user: StaffUser,
    ValidatedQuery(params): ValidatedQuery<LeaveFilterParams>,
) -> Result<Json<ApiResponse<Paginated<Leave>>>, AppError> {
    let page = LeaveService::list(&state.db, params).await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// Approve or reject a pending leave request
#[utoipa::path(
    patch,
    path = "/api/leaves/{id}/review",
    params(("id" = String, Path, description = "Leave request id")),
    request_body = ReviewLeaveRequest,
    responses(
        (status = 200, description = "Leave reviewed", body = ApiResponse<Leave>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 403, description = "Not allowed to review this request", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 409, description = "Already reviewed", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Leaves"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn review_leave(
    State(state): State<AppState>,
    user: StaffUser,
    PathId(id): PathId,
    ValidatedJson(dto): ValidatedJson<ReviewLeaveRequest>,
) -> Result<Json<ApiResponse<Leave>>, AppError> {
    let leave =
        LeaveService::review(&state.db, state.identities.as_ref(), &user, &id, dto).await?;
    Ok(Json(ApiResponse::ok(leave)))
}
