use sqlx::SqlitePool;

use crate::store::error::SchemaInitError;

/// `IF NOT EXISTS` turns a second initialization into a no-op instead of an error.
const CREATE_SUBSCRIBERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS subscribers (
        id              INTEGER PRIMARY KEY,
        email           TEXT NOT NULL UNIQUE,
        confirmed_at    INTEGER,
        opted_out       INTEGER NOT NULL DEFAULT 0
    )
"#;

#[tracing::instrument(name = "Initialize the subscribers schema", skip(db_pool))]
pub async fn initialize_schema(db_pool: &SqlitePool) -> Result<(), SchemaInitError> {
    sqlx::query(CREATE_SUBSCRIBERS_TABLE)
        .execute(db_pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to create subscribers table: {:?}", err);
            SchemaInitError(err)
        })?;

    Ok(())
}
