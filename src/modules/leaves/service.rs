use anyhow::{Context, anyhow};
use officehub_core::{AppError, Paginated};
use officehub_db::IdentityStore;
use officehub_models::{
    CreateLeaveRequest, Leave, LeaveFilterParams, LeaveStatus, ObjectId, ReviewLeaveRequest,
};
use sqlx::PgPool;
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::validator::to_object_id;

const LEAVE_COLUMNS: &str = "id, employee_id, leave_type, start_date, end_date, days, reason, \
     status, reviewed_by, review_note, reviewed_at, created_at, updated_at";

fn leave_not_found() -> AppError {
    AppError::not_found(anyhow!("Leave request not found"))
}

fn already_reviewed() -> AppError {
    AppError::conflict(anyhow!("Leave request has already been reviewed"))
}

pub struct LeaveService;

impl LeaveService {
    #[instrument(skip(db, dto))]
    pub async fn create(
        db: &PgPool,
        employee_id: &ObjectId,
        dto: CreateLeaveRequest,
    ) -> Result<Leave, AppError> {
        let days = i32::try_from(dto.days())
            .map_err(|_| AppError::field("endDate", "Leave span is too long"))?;

        let leave = sqlx::query_as::<_, Leave>(&format!(
            "INSERT INTO leaves (id, employee_id, leave_type, start_date, end_date, days, reason) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {LEAVE_COLUMNS}"
        ))
        .bind(ObjectId::new())
        .bind(employee_id)
        .bind(dto.leave_type)
        .bind(dto.start_date)
        .bind(dto.end_date)
        .bind(days)
        .bind(&dto.reason)
        .fetch_one(db)
        .await
        .context("Failed to insert leave request")
        .map_err(AppError::database)?;

        tracing::info!(leave_id = %leave.id, days, "Leave requested");
        Ok(leave)
    }

    /// Paginated listing; `employee_id` in the filter narrows to one employee.
    #[instrument(skip(db))]
    pub async fn list(db: &PgPool, params: LeaveFilterParams) -> Result<Paginated<Leave>, AppError> {
        let employee_id = params
            .employee_id
            .as_deref()
            .map(to_object_id)
            .transpose()?;
        let filter = "($1::leave_status IS NULL OR status = $1) \
             AND ($2::text IS NULL OR employee_id = $2)";

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM leaves WHERE {filter}"))
            .bind(params.status)
            .bind(&employee_id)
            .fetch_one(db)
            .await
            .context("Failed to count leave requests")
            .map_err(AppError::database)?;

        let leaves = sqlx::query_as::<_, Leave>(&format!(
            "SELECT {LEAVE_COLUMNS} FROM leaves WHERE {filter} \
             ORDER BY start_date DESC, created_at DESC LIMIT $3 OFFSET $4"
        ))
        .bind(params.status)
        .bind(&employee_id)
        .bind(params.pagination.limit())
        .bind(params.pagination.offset())
        .fetch_all(db)
        .await
        .context("Failed to fetch leave requests")
        .map_err(AppError::database)?;

        Ok(Paginated::new(leaves, &params.pagination, total))
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: &ObjectId) -> Result<Leave, AppError> {
        sqlx::query_as::<_, Leave>(&format!("SELECT {LEAVE_COLUMNS} FROM leaves WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch leave request")
            .map_err(AppError::database)?
            .ok_or_else(leave_not_found)
    }

    /// Approves or rejects a pending request.
    ///
    /// The reviewer may not review their own request and must outrank the
    /// applicant. Only `Pending` requests can be reviewed.
    #[instrument(skip(db, identities, reviewer, dto), fields(reviewer_id = %reviewer.id()))]
    pub async fn review(
        db: &PgPool,
        identities: &dyn IdentityStore,
        reviewer: &AuthUser,
        id: &ObjectId,
        dto: ReviewLeaveRequest,
    ) -> Result<Leave, AppError> {
        let leave = Self::get(db, id).await?;

        if &leave.employee_id == reviewer.id() {
            return Err(AppError::forbidden(
                "You cannot review your own leave request",
            ));
        }

        let applicant = identities
            .find_by_id(&leave.employee_id)
            .await?
            .ok_or_else(|| AppError::internal_error("Leave request references a missing user"))?;

        if !reviewer.role().outranks(applicant.role) {
            return Err(AppError::forbidden(
                "You can only review leave requests from lower-ranked staff",
            ));
        }

        if leave.status != LeaveStatus::Pending {
            return Err(already_reviewed());
        }

        let status = LeaveStatus::from(dto.status);
        let reviewed = sqlx::query_as::<_, Leave>(&format!(
            "UPDATE leaves SET status = $2, reviewed_by = $3, review_note = $4, \
                reviewed_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND status = 'Pending' \
             RETURNING {LEAVE_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .bind(reviewer.id())
        .bind(&dto.review_note)
        .fetch_optional(db)
        .await
        .context("Failed to review leave request")
        .map_err(AppError::database)?
        .ok_or_else(already_reviewed)?;

        tracing::info!(leave_id = %id, status = ?status, "Leave reviewed");
        Ok(reviewed)
    }
}
