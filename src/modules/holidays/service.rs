use anyhow::{Context, anyhow};
use officehub_core::AppError;
use officehub_db::unique_violation_or;
use officehub_models::{CreateHolidayRequest, Holiday, HolidayFilterParams, ObjectId};
use sqlx::PgPool;
use tracing::instrument;

const HOLIDAY_COLUMNS: &str = "id, name, date, description, created_at";

pub const DUPLICATE_DATE_MESSAGE: &str = "A holiday already exists on this date";

pub struct HolidayService;

impl HolidayService {
    #[instrument(skip(db))]
    pub async fn list(db: &PgPool, params: &HolidayFilterParams) -> Result<Vec<Holiday>, AppError> {
        sqlx::query_as::<_, Holiday>(&format!(
            "SELECT {HOLIDAY_COLUMNS} FROM holidays \
             WHERE ($1::int8 IS NULL OR EXTRACT(YEAR FROM date)::int8 = $1) \
             ORDER BY date"
        ))
        .bind(params.year)
        .fetch_all(db)
        .await
        .context("Failed to fetch holidays")
        .map_err(AppError::database)
    }

    /// One holiday per calendar date.
    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateHolidayRequest) -> Result<Holiday, AppError> {
        let holiday = sqlx::query_as::<_, Holiday>(&format!(
            "INSERT INTO holidays (id, name, date, description) VALUES ($1, $2, $3, $4) \
             RETURNING {HOLIDAY_COLUMNS}"
        ))
        .bind(ObjectId::new())
        .bind(&dto.name)
        .bind(dto.date)
        .bind(&dto.description)
        .fetch_one(db)
        .await
        .map_err(|e| unique_violation_or(e, DUPLICATE_DATE_MESSAGE))?;

        tracing::info!(holiday_id = %holiday.id, date = %holiday.date, "Holiday created");
        Ok(holiday)
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: &ObjectId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM holidays WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete holiday")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Holiday not found")));
        }

        tracing::info!(holiday_id = %id, "Holiday deleted");
        Ok(())
    }
}
