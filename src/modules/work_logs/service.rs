use anyhow::{Context, anyhow};
use officehub_core::{AppError, Paginated};
use officehub_models::{CreateWorkLogRequest, ObjectId, WorkLog, WorkLogFilterParams};
use sqlx::PgPool;
use tracing::instrument;

use crate::validator::to_object_id;

const WORK_LOG_COLUMNS: &str =
    "id, employee_id, project_id, work_date, hours, description, created_at";

pub struct WorkLogService;

impl WorkLogService {
    /// Records hours for `employee_id`. A referenced project must exist.
    #[instrument(skip(db, dto))]
    pub async fn create(
        db: &PgPool,
        employee_id: &ObjectId,
        dto: CreateWorkLogRequest,
    ) -> Result<WorkLog, AppError> {
        let project_id = dto.project_id.as_deref().map(to_object_id).transpose()?;

        if let Some(project_id) = &project_id {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1)")
                    .bind(project_id)
                    .fetch_one(db)
                    .await
                    .context("Failed to look up project")
                    .map_err(AppError::database)?;

            if !exists {
                return Err(AppError::not_found(anyhow!("Project not found")));
            }
        }

        let log = sqlx::query_as::<_, WorkLog>(&format!(
            "INSERT INTO work_logs (id, employee_id, project_id, work_date, hours, description) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {WORK_LOG_COLUMNS}"
        ))
        .bind(ObjectId::new())
        .bind(employee_id)
        .bind(&project_id)
        .bind(dto.date)
        .bind(dto.hours)
        .bind(&dto.description)
        .fetch_one(db)
        .await
        .context("Failed to insert work log")
        .map_err(AppError::database)?;

        tracing::info!(work_log_id = %log.id, hours = log.hours, "Work logged");
        Ok(log)
    }

    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        params: WorkLogFilterParams,
    ) -> Result<Paginated<WorkLog>, AppError> {
        let employee_id = params.employee_id.as_deref().map(to_object_id).transpose()?;
        let project_id = params.project_id.as_deref().map(to_object_id).transpose()?;
        let filter = "($1::text IS NULL OR employee_id = $1) \
             AND ($2::text IS NULL OR project_id = $2) \
             AND ($3::date IS NULL OR work_date >= $3) \
             AND ($4::date IS NULL OR work_date <= $4)";

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM work_logs WHERE {filter}"))
                .bind(&employee_id)
                .bind(&project_id)
                .bind(params.from)
                .bind(params.to)
                .fetch_one(db)
                .await
                .context("Failed to count work logs")
                .map_err(AppError::database)?;

        let logs = sqlx::query_as::<_, WorkLog>(&format!(
            "SELECT {WORK_LOG_COLUMNS} FROM work_logs WHERE {filter} \
             ORDER BY work_date DESC, created_at DESC LIMIT $5 OFFSET $6"
        ))
        .bind(&employee_id)
        .bind(&project_id)
        .bind(params.from)
        .bind(params.to)
        .bind(params.pagination.limit())
        .bind(params.pagination.offset())
        .fetch_all(db)
        .await
        .context("Failed to fetch work logs")
        .map_err(AppError::database)?;

        Ok(Paginated::new(logs, &params.pagination, total))
    }
}
