use axum::{Json, extract::State, http::StatusCode};
use officehub_core::{ApiResponse, AppError};
use officehub_models::{Attendance, AttendanceQuery, CheckInRequest};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::middleware::role::{AnyUser, StaffUser};
use crate::modules::attendance::service::AttendanceService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedQuery};

/// Check in for today
#[utoipa::path(
    post,
    path = "/api/attendance/check-in",
    request_body = CheckInRequest,
    responses(
        (status = 201, description = "Checked in", body = ApiResponse<Attendance>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 409, description = "Already checked in today", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn check_in(
    State(state): State<AppState>,
    user: AnyUser,
    ValidatedJson(dto): ValidatedJson<CheckInRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Attendance>>), AppError> {
    let record = AttendanceService::check_in(&state.db, user.id(), dto).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(record))))
}

/// Check out for today
#[utoipa::path(
    post,
    path = "/api/attendance/check-out",
    responses(
        (status = 200, description = "Checked out", body = ApiResponse<Attendance>),
        (status = 400, description = "No check-in today", body = ErrorResponse),
        (status = 409, description = "Already checked out today", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn check_out(
    State(state): State<AppState>,
    user: AnyUser,
) -> Result<Json<ApiResponse<Attendance>>, AppError> {
    let record = AttendanceService::check_out(&state.db, user.id()).await?;
    Ok(Json(ApiResponse::ok(record)))
}

/// My attendance
#[utoipa::path(
    get,
    path = "/api/attendance/mine",
    params(
        ("from" = Option<String>, Query, description = "First day (YYYY-MM-DD), default 30 days before `to`"),
        ("to" = Option<String>, Query, description = "Last day (YYYY-MM-DD), default today"),
    ),
    responses(
        (status = 200, description = "Attendance records", body = ApiResponse<Vec<Attendance>>),
        (status = 400, description = "Invalid range", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn list_my_attendance(
    State(state): State<AppState>,
    user: AnyUser,
    ValidatedQuery(query): ValidatedQuery<AttendanceQuery>,
) -> Result<Json<ApiResponse<Vec<Attendance>>>, AppError> {
    let records = AttendanceService::list(&state.db, Some(user.id()), &query).await?;
    Ok(Json(ApiResponse::ok(records)))
}

/// Attendance across employees
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(
        ("from" = Option<String>, Query, description = "First day (YYYY-MM-DD)"),
        ("to" = Option<String>, Query, description = "Last day (YYYY-MM-DD)"),
        ("employeeId" = Option<String>, Query, description = "Only this employee"),
    ),
    responses(
        (status = 200, description = "Attendance records", body = ApiResponse<Vec<Attendance>>),
        (status = 400, description = "Invalid range", body = ErrorResponse),
        (status = 403, description = "Admin or Manager role required", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn list_attendance(
    State(state): State<AppState>,
    user: StaffUser,
    ValidatedQuery(query): ValidatedQuery<AttendanceQuery>,
) -> Result<Json<ApiResponse<Vec<Attendance>>>, AppError> {
    let records = AttendanceService::list_all(&state.db, &query).await?;
    Ok(Json(ApiResponse::ok(records)))
}
