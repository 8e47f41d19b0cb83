use innkeep_core::DataContext;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::{StoreBookingRepository, StoreReviewFeedRepository, StoreRoomRepository};

#[derive(Clone)]
pub struct DbClient {
    pub pool: Pool<Postgres>,
}

impl DbClient {
    pub async fn new(connection_string: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(connection_string)
            .await?;

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations...");
        sqlx::migrate!("../migrations")
            .run(&self.pool)
            .await?;
        info!("Migrations completed successfully.");
        Ok(())
    }

    /// Postgres-backed repositories sharing this pool.
    pub fn data_context(&self) -> DataContext {
        DataContext::new(
            Arc::new(StoreRoomRepository::new(self.pool.clone())),
            Arc::new(StoreBookingRepository::new(self.pool.clone())),
            Arc::new(StoreReviewFeedRepository::new(self.pool.clone())),
        )
    }
}
