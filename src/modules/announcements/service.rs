use anyhow::{Context, anyhow};
use chrono::{NaiveDate, Utc};
use officehub_auth::Role;
use officehub_core::AppError;
use officehub_models::{Announcement, Audience, CreateAnnouncementRequest, ObjectId};
use sqlx::PgPool;
use tracing::instrument;

const ANNOUNCEMENT_COLUMNS: &str =
    "id, title, content, audience, pinned, expires_on, author_id, created_at";

pub struct AnnouncementService;

impl AnnouncementService {
    /// Announcements `role` may read that have not expired by `today`.
    /// Pinned first, then newest.
    #[instrument(skip(db))]
    pub async fn list_visible(
        db: &PgPool,
        role: Role,
        today: NaiveDate,
    ) -> Result<Vec<Announcement>, AppError> {
        sqlx::query_as::<_, Announcement>(&format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements \
             WHERE audience = ANY($1) AND (expires_on IS NULL OR expires_on >= $2) \
             ORDER BY pinned DESC, created_at DESC"
        ))
        .bind(Audience::visible_to(role))
        .bind(today)
        .fetch_all(db)
        .await
        .context("Failed to fetch announcements")
        .map_err(AppError::database)
    }

    #[instrument(skip(db, dto))]
    pub async fn create(
        db: &PgPool,
        author_id: &ObjectId,
        dto: CreateAnnouncementRequest,
    ) -> Result<Announcement, AppError> {
        if let Some(expires_on) = dto.expires_on
            && expires_on < Utc::now().date_naive()
        {
            return Err(AppError::field("expiresOn", "Expiry date cannot be in the past"));
        }

        let announcement = sqlx::query_as::<_, Announcement>(&format!(
            "INSERT INTO announcements (id, title, content, audience, pinned, expires_on, author_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {ANNOUNCEMENT_COLUMNS}"
        ))
        .bind(ObjectId::new())
        .bind(&dto.title)
        .bind(&dto.content)
        .bind(dto.audience)
        .bind(dto.pinned)
        .bind(dto.expires_on)
        .bind(author_id)
        .fetch_one(db)
        .await
        .context("Failed to insert announcement")
        .map_err(AppError::database)?;

        tracing::info!(announcement_id = %announcement.id, audience = ?announcement.audience, "Announcement published");
        Ok(announcement)
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: &ObjectId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete announcement")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Announcement not found")));
        }

        tracing::info!(announcement_id = %id, "Announcement deleted");
        Ok(())
    }
}
