use anyhow::{Context, anyhow};
use chrono::{Duration, NaiveDate, Utc};
use officehub_core::AppError;
use officehub_models::attendance::{MAX_RANGE_DAYS, worked_minutes};
use officehub_models::{Attendance, AttendanceQuery, CheckInRequest, ObjectId};
use sqlx::PgPool;
use tracing::instrument;

use crate::validator::to_object_id;

const ATTENDANCE_COLUMNS: &str =
    "id, employee_id, work_date, check_in_at, check_out_at, worked_minutes, note, created_at";

/// Days covered when a query gives no lower bound.
const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Resolves the query window: `to` defaults to `today`, `from` to 30 days earlier.
pub fn resolve_range(
    query: &AttendanceQuery,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate), AppError> {
    let to = query.to.unwrap_or(today);
    let from = query
        .from
        .unwrap_or_else(|| to - Duration::days(DEFAULT_WINDOW_DAYS));

    if to < from {
        return Err(AppError::field("to", "to must be on or after from"));
    }
    if (to - from).num_days() >= MAX_RANGE_DAYS {
        return Err(AppError::field("to", "Date range cannot exceed 366 days"));
    }
    Ok((from, to))
}

pub struct AttendanceService;

impl AttendanceService {
    /// Opens today's record. One per employee per UTC day.
    #[instrument(skip(db, dto))]
    pub async fn check_in(
        db: &PgPool,
        employee_id: &ObjectId,
        dto: CheckInRequest,
    ) -> Result<Attendance, AppError> {
        let now = Utc::now();

        let record = sqlx::query_as::<_, Attendance>(&format!(
            "INSERT INTO attendance (id, employee_id, work_date, check_in_at, note) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (employee_id, work_date) DO NOTHING \
             RETURNING {ATTENDANCE_COLUMNS}"
        ))
        .bind(ObjectId::new())
        .bind(employee_id)
        .bind(now.date_naive())
        .bind(now)
        .bind(&dto.note)
        .fetch_optional(db)
        .await
        .context("Failed to record check-in")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::conflict(anyhow!("You have already checked in today")))?;

        tracing::info!(attendance_id = %record.id, "Checked in");
        Ok(record)
    }

    /// Closes today's open record and stores the worked minutes.
    #[instrument(skip(db))]
    pub async fn check_out(db: &PgPool, employee_id: &ObjectId) -> Result<Attendance, AppError> {
        let now = Utc::now();

        let today = sqlx::query_as::<_, Attendance>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance WHERE employee_id = $1 AND work_date = $2"
        ))
        .bind(employee_id)
        .bind(now.date_naive())
        .fetch_optional(db)
        .await
        .context("Failed to fetch today's attendance")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::bad_request(anyhow!("You have not checked in today")))?;

        let already_out = || AppError::conflict(anyhow!("You have already checked out today"));
        if today.check_out_at.is_some() {
            return Err(already_out());
        }

        let record = sqlx::query_as::<_, Attendance>(&format!(
            "UPDATE attendance SET check_out_at = $2, worked_minutes = $3 \
             WHERE id = $1 AND check_out_at IS NULL \
             RETURNING {ATTENDANCE_COLUMNS}"
        ))
        .bind(&today.id)
        .bind(now)
        .bind(worked_minutes(today.check_in_at, now))
        .fetch_optional(db)
        .await
        .context("Failed to record check-out")
        .map_err(AppError::database)?
        .ok_or_else(already_out)?;

        tracing::info!(
            attendance_id = %record.id,
            worked_minutes = record.worked_minutes,
            "Checked out"
        );
        Ok(record)
    }

    /// Records in the query window, newest first. `employee_id` restricts
    /// to one employee.
    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        employee_id: Option<&ObjectId>,
        query: &AttendanceQuery,
    ) -> Result<Vec<Attendance>, AppError> {
        let (from, to) = resolve_range(query, Utc::now().date_naive())?;

        sqlx::query_as::<_, Attendance>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance \
             WHERE ($1::text IS NULL OR employee_id = $1) \
               AND work_date BETWEEN $2 AND $3 \
             ORDER BY work_date DESC, check_in_at DESC"
        ))
        .bind(employee_id)
        .bind(from)
        .bind(to)
        .fetch_all(db)
        .await
        .context("Failed to fetch attendance")
        .map_err(AppError::database)
    }

    /// Staff listing; honours the optional `employeeId` filter.
    pub async fn list_all(db: &PgPool, query: &AttendanceQuery) -> Result<Vec<Attendance>, AppError> {
        let employee_id = query.employee_id.as_deref().map(to_object_id).transpose()?;
        Self::list(db, employee_id.as_ref(), query).await
    }
}
