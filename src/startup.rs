use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::config::{DatabaseSettings, Settings};
use crate::store::{SchemaInitError, SubscriberStore};

#[derive(Debug)]
pub struct Application {
    db_pool: SqlitePool,
}

impl Application {
    /// Opens the pool and makes sure the `subscribers` table exists.
    pub async fn build(config: Settings) -> Result<Self, SchemaInitError> {
        let db_pool = get_connection_db_pool(&config.database);

        SubscriberStore::new(&db_pool).initialize_schema().await?;

        tracing::info!(
            "Subscriber store ready, database file = {}",
            config.get_db_filename()
        );

        Ok(Self { db_pool })
    }

    pub fn get_db_pool(&self) -> &SqlitePool {
        &self.db_pool
    }

    pub fn store(&self) -> SubscriberStore<'_> {
        SubscriberStore::new(&self.db_pool)
    }

    pub async fn close(self) {
        self.db_pool.close().await
    }
}

pub fn get_connection_db_pool(config: &DatabaseSettings) -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(config.get_max_connections())
        .acquire_timeout(config.get_acquire_timeout())
        .connect_lazy_with(config.get_db_options())
}
