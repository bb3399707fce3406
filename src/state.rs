use std::fmt;
use std::sync::Arc;

use anyhow::Context;
use officehub_config::{AppConfig, CorsConfig, JwtConfig};
use officehub_db::{IdentityStore, MIGRATOR, PgIdentityStore, init_db_pool};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Identity lookups used by the request gate and the auth/users modules.
    pub identities: Arc<dyn IdentityStore>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(db: PgPool, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            identities: Arc::new(PgIdentityStore::new(db.clone())),
            db,
            jwt_config,
            cors_config,
        }
    }

    /// Swaps the identity store, e.g. for an in-memory one in tests.
    pub fn with_identity_store(mut self, identities: Arc<dyn IdentityStore>) -> Self {
        self.identities = identities;
        self
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}

/// Connects to Postgres, applies pending migrations and builds the state.
pub async fn init_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let db = init_db_pool(&config.database)
        .await
        .context("failed to connect to database")?;

    MIGRATOR
        .run(&db)
        .await
        .context("failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    Ok(AppState::new(
        db,
        config.jwt.clone(),
        config.cors.clone(),
    ))
}
