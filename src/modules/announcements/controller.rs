use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use officehub_core::{ApiResponse, AppError, response::MessageResponse};
use officehub_models::{Announcement, CreateAnnouncementRequest};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::middleware::role::{AdminUser, AnyUser, StaffUser};
use crate::modules::announcements::service::AnnouncementService;
use crate::state::AppState;
use crate::validator::{PathId, ValidatedJson};

/// Announcements visible to the caller
#[utoipa::path(
    get,
    path = "/api/announcements",
    responses(
        (status = 200, description = "Active announcements, pinned first", body = ApiResponse<Vec<Announcement>>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Announcements"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn list_announcements(
    State(state): State<AppState>,
    user: AnyUser,
) -> Result<Json<ApiResponse<Vec<Announcement>>>, AppError> {
    let announcements =
        AnnouncementService::list_visible(&state.db, user.role(), Utc::now().date_naive()).await?;
    Ok(Json(ApiResponse::ok(announcements)))
}

/// Publish an announcement
#[utoipa::path(
    post,
    path = "/api/announcements",
    request_body = CreateAnnouncementRequest,
    responses(
        (status = 201, description = "Announcement published", body = ApiResponse<Announcement>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 403, description = "Admin or Manager role required", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Announcements"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn create_announcement(
    State(state): State<AppState>,
    user: StaffUser,
    ValidatedJson(dto): ValidatedJson<CreateAnnouncementRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Announcement>>), AppError> {
    let announcement = AnnouncementService::create(&state.db, user.id(), dto).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(announcement))))
}

/// Delete an announcement
#[utoipa::path(
    delete,
    path = "/api/announcements/{id}",
    params(("id" = String, Path, description = "Announcement id")),
    responses(
        (status = 200, description = "Announcement deleted", body = ApiResponse<MessageResponse>),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Announcements"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn delete_announcement(
    State(state): State<AppState>,
    user: AdminUser,
    PathId(id): PathId,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    AnnouncementService::delete(&state.db, &id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Announcement deleted"))))
}
