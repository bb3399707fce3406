use axum::{Json, extract::State, http::StatusCode};
use officehub_core::{ApiResponse, AppError, Paginated};
use officehub_models::{CreateWorkLogRequest, WorkLog, WorkLogFilterParams};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::middleware::role::{AnyUser, StaffUser};
use crate::modules::work_logs::service::WorkLogService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedQuery};

/// Log hours
#[utoipa::path(
    post,
    path = "/api/work-logs",
    request_body = CreateWorkLogRequest,
    responses(
        (status = 201, description = "Work logged", body = ApiResponse<WorkLog>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Work Logs"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn create_work_log(
    State(state): State<AppState>,
    user: AnyUser,
    ValidatedJson(dto): ValidatedJson<CreateWorkLogRequest>,
) -> Result<(StatusCode, Json<ApiResponse<WorkLog>>), AppError> {
    let log = WorkLogService::create(&state.db, user.id(), dto).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(log))))
}

/// My work logs
#[utoipa::path(
    get,
    path = "/api/work-logs/mine",
    params(
        ("projectId" = Option<String>, Query, description = "Only this project"),
        ("from" = Option<String>, Query, description = "First day (YYYY-MM-DD)"),
        ("to" = Option<String>, Query, description = "Last day (YYYY-MM-DD)"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default: 20, max: 100)"),
    ),
    responses(
        (status = 200, description = "Caller's work logs", body = ApiResponse<Paginated<WorkLog>>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Work Logs"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn list_my_work_logs(
    State(state): State<AppState>,
    user: AnyUser,
    ValidatedQuery(mut params): ValidatedQuery<WorkLogFilterParams>,
) -> Result<Json<ApiResponse<Paginated<WorkLog>>>, AppError> {
    params.employee_id = Some(user.id().to_string());
    let page = WorkLogService::list(&state.db, params).await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// All work logs
#[utoipa::path(
    get,
    path = "/api/work-logs",
    params(
        ("employeeId" = Option<String>, Query, description = "Only this employee"),
        ("projectId" = Option<String>, Query, description = "Only this project"),
        ("from" = Option<String>, Query, description = "First day (YYYY-MM-DD)"),
        ("to" = Option<String>, Query, description = "Last day (YYYY-MM-DD)"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default: 20, max: 100)"),
    ),
    responses(
        (status = 200, description = "Work logs", body = ApiResponse<Paginated<WorkLog>>),
        (status = 403, description = "Admin or Manager role required", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Work Logs"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn list_work_logs(
    State(state): State<AppState>,
    user: StaffUser,
    ValidatedQuery(params): ValidatedQuery<WorkLogFilterParams>,
) -> Result<Json<ApiResponse<Paginated<WorkLog>>>, AppError> {
    let page = WorkLogService::list(&state.db, params).await?;
    Ok(Json(ApiResponse::ok(page)))
}
