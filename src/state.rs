use std::sync::Arc;

use freelearn_config::{AppConfig, CorsConfig, JwtConfig};
use freelearn_db::{
    CourseRepository, MemoryStore, PgPool, PostgresStore, StoreError, UserRepository,
    init_db_pool,
};
use tracing::info;

/// Shared, read-only request state. Cloning is cheap: stores sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pool: Option<PgPool>,
}

impl AppState {
    /// Connects to Postgres and applies pending migrations.
    pub async fn connect(config: &AppConfig) -> Result<Self, StoreError> {
        let pool = init_db_pool(&config.database).await?;
        let store = Arc::new(PostgresStore::new(pool.clone(), config.database.timeout()));
        store.migrate().await?;

        info!(database = %config.database.name, "Connected to database");

        Ok(Self {
            users: store.clone(),
            courses: store,
            jwt_config: config.jwt.clone(),
            cors_config: config.cors.clone(),
            pool: Some(pool),
        })
    }

    /// State backed by a fresh [`MemoryStore`].
    pub fn in_memory(jwt_config: JwtConfig) -> Self {
        let store = Arc::new(MemoryStore::new());

        Self {
            users: store.clone(),
            courses: store,
            jwt_config,
            cors_config: CorsConfig::default(),
            pool: None,
        }
    }

    /// Closes the connection pool, if any.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
