use anyhow::{Context, anyhow};
use officehub_core::{AppError, Paginated};
use officehub_models::projects::END_DATE_MESSAGE;
use officehub_models::{
    CreateProjectRequest, ObjectId, Project, ProjectFilterParams, UpdateProjectRequest,
};
use sqlx::PgPool;
use tracing::instrument;

use crate::validator::to_object_id;

const PROJECT_COLUMNS: &str = "id, name, description, client_name, status, start_date, \
     expected_end_date, manager_id, member_ids, created_by, created_at, updated_at";

fn project_not_found() -> AppError {
    AppError::not_found(anyhow!("Project not found"))
}

fn to_object_ids(ids: &[String]) -> Result<Vec<ObjectId>, AppError> {
    ids.iter().map(|id| to_object_id(id)).collect()
}

pub struct ProjectService;

impl ProjectService {
    /// Fails with a field error unless every id belongs to an active user.
    async fn ensure_users_exist(
        db: &PgPool,
        ids: &[ObjectId],
        field: &'static str,
    ) -> Result<(), AppError> {
        if ids.is_empty() {
            return Ok(());
        }

        let found: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE id = ANY($1) AND is_active",
        )
        .bind(ids)
        .fetch_one(db)
        .await
        .context("Failed to check project users")
        .map_err(AppError::database)?;

        if found != ids.len() as i64 {
            return Err(AppError::field(
                field,
                format!("{field} must reference existing active users"),
            ));
        }
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        params: ProjectFilterParams,
    ) -> Result<Paginated<Project>, AppError> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM projects WHERE ($1::project_status IS NULL OR status = $1)",
        )
        .bind(params.status)
        .fetch_one(db)
        .await
        .context("Failed to count projects")
        .map_err(AppError::database)?;

        let projects = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects \
             WHERE ($1::project_status IS NULL OR status = $1) \
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3"
        ))
        .bind(params.status)
        .bind(params.pagination.limit())
        .bind(params.pagination.offset())
        .fetch_all(db)
        .await
        .context("Failed to fetch projects")
        .map_err(AppError::database)?;

        Ok(Paginated::new(projects, &params.pagination, total))
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: &ObjectId) -> Result<Project, AppError> {
        sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch project")
        .map_err(AppError::database)?
        .ok_or_else(project_not_found)
    }

    #[instrument(skip(db, dto), fields(name = %dto.name))]
    pub async fn create(
        db: &PgPool,
        created_by: &ObjectId,
        dto: CreateProjectRequest,
    ) -> Result<Project, AppError> {
        let manager_id = dto.manager_id.as_deref().map(to_object_id).transpose()?;
        let member_ids = to_object_ids(&dto.member_ids)?;

        Self::ensure_users_exist(db, manager_id.as_slice(), "managerId").await?;
        Self::ensure_users_exist(db, &member_ids, "memberIds").await?;

        let project = sqlx::query_as::<_, Project>(&format!(
            "INSERT INTO projects \
                (id, name, description, client_name, status, start_date, expected_end_date, \
                 manager_id, member_ids, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(ObjectId::new())
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(&dto.client_name)
        .bind(dto.status)
        .bind(dto.start_date)
        .bind(dto.expected_end_date)
        .bind(&manager_id)
        .bind(&member_ids)
        .bind(created_by)
        .fetch_one(db)
        .await
        .context("Failed to insert project")
        .map_err(AppError::database)?;

        tracing::info!(project_id = %project.id, "Project created");
        Ok(project)
    }

    /// Applies a partial update. The date order is checked against the
    /// stored values for any date the request leaves out.
    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: &ObjectId,
        dto: UpdateProjectRequest,
    ) -> Result<Project, AppError> {
        let existing = Self::get(db, id).await?;

        let start_date = dto.start_date.unwrap_or(existing.start_date);
        let expected_end_date = dto.expected_end_date.or(existing.expected_end_date);
        if expected_end_date.is_some_and(|end| end < start_date) {
            return Err(AppError::field("expectedEndDate", END_DATE_MESSAGE));
        }

        let manager_id = dto.manager_id.as_deref().map(to_object_id).transpose()?;
        let member_ids = dto
            .member_ids
            .as_deref()
            .map(to_object_ids)
            .transpose()?;

        Self::ensure_users_exist(db, manager_id.as_slice(), "managerId").await?;
        if let Some(member_ids) = &member_ids {
            Self::ensure_users_exist(db, member_ids, "memberIds").await?;
        }

        let project = sqlx::query_as::<_, Project>(&format!(
            "UPDATE projects SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                client_name = COALESCE($4, client_name), \
                status = COALESCE($5, status), \
                start_date = $6, \
                expected_end_date = $7, \
                manager_id = COALESCE($8, manager_id), \
                member_ids = COALESCE($9, member_ids), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(id)
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(&dto.client_name)
        .bind(dto.status)
        .bind(start_date)
        .bind(expected_end_date)
        .bind(&manager_id)
        .bind(&member_ids)
        .fetch_optional(db)
        .await
        .context("Failed to update project")
        .map_err(AppError::database)?
        .ok_or_else(project_not_found)?;

        tracing::info!(project_id = %project.id, "Project updated");
        Ok(project)
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: &ObjectId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete project")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(project_not_found());
        }

        tracing::info!(project_id = %id, "Project deleted");
        Ok(())
    }
}
