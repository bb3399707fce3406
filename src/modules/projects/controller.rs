use axum::{Json, extract::State, http::StatusCode};
use officehub_core::{ApiResponse, AppError, Paginated, response::MessageResponse};
use officehub_models::{CreateProjectRequest, Project, ProjectFilterParams, UpdateProjectRequest};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::middleware::role::{AdminUser, AnyUser, StaffUser};
use crate::modules::projects::service::ProjectService;
use crate::state::AppState;
use crate::validator::{PathId, ValidatedJson, ValidatedQuery};

/// List projects
#[utoipa::path(
    get,
    path = "/api/projects",
    params(
        ("status" = Option<String>, Query, description = "Planned, Active, OnHold, Completed or Cancelled"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default: 20, max: 100)"),
    ),
    responses(
        (status = 200, description = "Page of projects", body = ApiResponse<Paginated<Project>>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Projects"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn list_projects(
    State(state): State<AppState>,
    user: AnyUser,
    ValidatedQuery(params): ValidatedQuery<ProjectFilterParams>,
) -> Result<Json<ApiResponse<Paginated<Project>>>, AppError> {
    let page = ProjectService::list(&state.db, params).await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// Get a project
#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project", body = ApiResponse<Project>),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Projects"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn get_project(
    State(state): State<AppState>,
    user: AnyUser,
    PathId(id): PathId,
) -> Result<Json<ApiResponse<Project>>, AppError> {
    let project = ProjectService::get(&state.db, &id).await?;
    Ok(Json(ApiResponse::ok(project)))
}

/// Create a project
#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ApiResponse<Project>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 403, description = "Admin or Manager role required", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Projects"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn create_project(
    State(state): State<AppState>,
    user: StaffUser,
    ValidatedJson(dto): ValidatedJson<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Project>>), AppError> {
    let project = ProjectService::create(&state.db, user.id(), dto).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(project))))
}

/// Update a project
#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    params(("id" = String, Path, description = "Project id")),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated", body = ApiResponse<Project>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 403, description = "Admin or Manager role required", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Projects"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn update_project(
    State(state): State<AppState>,
    user: StaffUser,
    PathId(id): PathId,
    ValidatedJson(dto): ValidatedJson<UpdateProjectRequest>,
) -> Result<Json<ApiResponse<Project>>, AppError> {
    let project = ProjectService::update(&state.db, &id, dto).await?;
    Ok(Json(ApiResponse::ok(project)))
}

/// Delete a project
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project deleted", body = ApiResponse<MessageResponse>),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Projects"
)]
#[instrument(skip_all, fields(user_id = %user.id()))]
pub async fn delete_project(
    State(state): State<AppState>,
    user: AdminUser,
    PathId(id): PathId,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    ProjectService::delete(&state.db, &id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Project deleted"))))
}
