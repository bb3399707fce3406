use axum::{Json, extract::State, http::StatusCode};
use officehub_core::{ApiResponse, AppError, response::MessageResponse};
use officehub_models::{CreateHolidayRequest, Holiday, HolidayFilterParams};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::middleware::role::{AdminUser, AnyUser};
use crate::modules::holidays::service::HolidayService;
use crate::state::AppState;
use crate::validator::{PathId, ValidatedJson, ValidatedQuery};

/// List holidays
#[utoipa::path(
    get,
    path = "/api/holidays",
    params(("year" = Option<i64>, Query, description = "Only this calendar year")),
    responses(
        (status = 200, description = "Holidays ordered by date", body = ApiResponse<Vec<Holiday>>),
        (status = 400, description = "Invalid year", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Holidays"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn list_holidays(
    State(state): State<AppState>,
    user: AnyUser,
    ValidatedQuery(params): ValidatedQuery<HolidayFilterParams>,
) -> Result<Json<ApiResponse<Vec<Holiday>>>, AppError> {
    let holidays = HolidayService::list(&state.db, &params).await?;
    Ok(Json(ApiResponse::ok(holidays)))
}

/// Create a holiday
#[utoipa::path(
    post,
    path = "/api/holidays",
    request_body = CreateHolidayRequest,
    responses(
        (status = 201, description = "Holiday created", body = ApiResponse<Holiday>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 409, description = "Date already taken", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Holidays"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn create_holiday(
    State(state): State<AppState>,
    user: AdminUser,
    ValidatedJson(dto): ValidatedJson<CreateHolidayRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Holiday>>), AppError> {
    let holiday = HolidayService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(holiday))))
}

/// Delete a holiday
#[utoipa::path(
    delete,
    path = "/api/holidays/{id}",
    params(("id" = String, Path, description = "Holiday id")),
    responses(
        (status = 200, description = "Holiday deleted", body = ApiResponse<MessageResponse>),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Holidays"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn delete_holiday(
    State(state): State<AppState>,
    user: AdminUser,
    PathId(id): PathId,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    HolidayService::delete(&state.db, &id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Holiday deleted"))))
}
