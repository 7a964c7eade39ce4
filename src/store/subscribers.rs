use chrono::{DateTime, TimeZone, Utc};
use sqlx::sqlite::{Sqlite, SqliteRow};
use sqlx::{Row, SqlitePool};

use crate::domain::{SubscriberEmail, SubscriberRecord, SubscriberUpdate};
use crate::store::error::{RecordDecodeError, SchemaInitError, StoreError};
use crate::store::schema;

/// Extended result code SQLite reports for a UNIQUE constraint violation.
const SQLITE_CONSTRAINT_UNIQUE: &str = "2067";

/// Data access for the `subscribers` table.
///
/// The store borrows the pool owned by the caller and keeps no state of its own, so
/// building one per request is fine.
#[derive(Debug, Clone, Copy)]
pub struct SubscriberStore<'a> {
    db_pool: &'a SqlitePool,
}

impl<'a> SubscriberStore<'a> {
    pub fn new(db_pool: &'a SqlitePool) -> Self {
        Self { db_pool }
    }

    pub async fn initialize_schema(&self) -> Result<(), SchemaInitError> {
        schema::initialize_schema(self.db_pool).await
    }

    /// Inserts an unconfirmed, subscribed row for `email`.
    ///
    /// Fails with [`StoreError::DuplicateKey`] when the email is already stored, callers
    /// wanting insert-or-update semantics should use [`SubscriberStore::upsert_subscriber`].
    #[tracing::instrument(
        name = "Insert a new subscriber into the database",
        skip(self, email),
        fields(subscriber_email = %email)
    )]
    pub async fn create_subscriber(&self, email: &SubscriberEmail) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO subscribers (email, confirmed_at, opted_out)
            VALUES (?, 0, 0)
            "#,
        )
        .bind(email.as_ref())
        .execute(self.db_pool)
        .await
        .map_err(|err| classify_write_error(err, email))?;

        Ok(())
    }

    /// Returns `Ok(None)` when no subscriber is stored for `email`.
    #[tracing::instrument(
        name = "Fetch a subscriber by email",
        skip(self, email),
        fields(subscriber_email = %email)
    )]
    pub async fn fetch_subscriber(
        &self,
        email: &SubscriberEmail,
    ) -> Result<Option<SubscriberRecord>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, confirmed_at, opted_out
            FROM subscribers
            WHERE email = ?
            LIMIT 1
            "#,
        )
        .bind(email.as_ref())
        .fetch_optional(self.db_pool)
        .await
        .map_err(storage_unavailable)?;

        match row {
            Some(row) => Ok(Some(subscriber_from_row(&row).map_err(decode_failed)?)),
            None => Ok(None),
        }
    }

    /// Writes `update` as the full state of the subscriber, inserting the row if needed.
    ///
    /// Both `confirmed_at` and `opted_out` are overwritten on conflict, so an upsert can
    /// also bring an opted out subscriber back.
    #[tracing::instrument(
        name = "Upsert a subscriber",
        skip(self, update),
        fields(
            subscriber_email = %update.email,
            opted_out = update.opted_out
        )
    )]
    pub async fn upsert_subscriber(&self, update: &SubscriberUpdate) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO subscribers (email, confirmed_at, opted_out)
            VALUES (?, ?, ?)
            ON CONFLICT (email) DO UPDATE SET
                confirmed_at = excluded.confirmed_at,
                opted_out = excluded.opted_out
            "#,
        )
        .bind(update.email.as_ref())
        .bind(encode_confirmed_at(update.confirmed_at))
        .bind(update.opted_out)
        .execute(self.db_pool)
        .await
        .map_err(storage_unavailable)?;

        Ok(())
    }

    /// Soft-deletes the subscriber. Unknown emails are not an error.
    #[tracing::instrument(
        name = "Opt out a subscriber",
        skip(self, email),
        fields(subscriber_email = %email)
    )]
    pub async fn opt_out_subscriber(&self, email: &SubscriberEmail) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE subscribers
            SET opted_out = 1
            WHERE email = ?
            "#,
        )
        .bind(email.as_ref())
        .execute(self.db_pool)
        .await
        .map_err(storage_unavailable)?;

        if result.rows_affected() == 0 {
            tracing::debug!("No subscriber stored for this email, nothing to opt out");
        }

        Ok(())
    }

    /// Subscribers that completed the double opt-in and did not opt out, oldest first.
    #[tracing::instrument(name = "Fetch confirmed subscribers", skip(self))]
    pub async fn fetch_confirmed_subscribers(&self) -> Result<Vec<SubscriberRecord>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, email, confirmed_at, opted_out
            FROM subscribers
            WHERE confirmed_at IS NOT NULL
              AND confirmed_at <> 0
              AND opted_out = 0
            ORDER BY id
            "#,
        )
        .fetch_all(self.db_pool)
        .await
        .map_err(storage_unavailable)?;

        rows.iter()
            .map(|row| subscriber_from_row(row).map_err(decode_failed))
            .collect()
    }
}

fn subscriber_from_row(row: &SqliteRow) -> Result<SubscriberRecord, RecordDecodeError> {
    let id: i64 = get_column(row, "id")?;
    let email: String = get_column(row, "email")?;
    let confirmed_at: Option<i64> = get_column(row, "confirmed_at")?;
    let opted_out: i64 = get_column(row, "opted_out")?;

    let email = SubscriberEmail::parse(email).map_err(RecordDecodeError::InvalidEmail)?;
    let opted_out = match opted_out {
        0 => false,
        1 => true,
        other => return Err(RecordDecodeError::InvalidOptedOut(other)),
    };

    Ok(SubscriberRecord {
        id,
        email,
        confirmed_at: decode_confirmed_at(confirmed_at)?,
        opted_out,
    })
}

fn get_column<'r, T>(row: &'r SqliteRow, column: &'static str) -> Result<T, RecordDecodeError>
where
    T: sqlx::Decode<'r, Sqlite> + sqlx::Type<Sqlite>,
{
    row.try_get(column)
        .map_err(|source| RecordDecodeError::Column { column, source })
}

// 0 is how an unconfirmed subscriber is stored
fn encode_confirmed_at(confirmed_at: Option<DateTime<Utc>>) -> i64 {
    confirmed_at.map(|at| at.timestamp()).unwrap_or(0)
}

fn decode_confirmed_at(seconds: Option<i64>) -> Result<Option<DateTime<Utc>>, RecordDecodeError> {
    match seconds {
        None | Some(0) => Ok(None),
        Some(seconds) => Utc
            .timestamp_opt(seconds, 0)
            .single()
            .map(Some)
            .ok_or(RecordDecodeError::InvalidConfirmedAt(seconds)),
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(SQLITE_CONSTRAINT_UNIQUE)
                || db_err.message().contains("UNIQUE constraint failed")
        }
        _ => false,
    }
}

fn classify_write_error(err: sqlx::Error, email: &SubscriberEmail) -> StoreError {
    if is_unique_violation(&err) {
        tracing::warn!("Subscriber already exists");
        return StoreError::DuplicateKey(email.to_string());
    }

    storage_unavailable(err)
}

fn decode_failed(err: RecordDecodeError) -> StoreError {
    tracing::error!("Failed to decode subscriber row: {:?}", err);
    StoreError::Decode(err)
}

fn storage_unavailable(err: sqlx::Error) -> StoreError {
    tracing::error!("Failed to execute query: {:?}", err);
    StoreError::StorageUnavailable(err)
}
