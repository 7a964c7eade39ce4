/// Raised when the `subscribers` table cannot be created. Startup cannot continue.
#[derive(thiserror::Error)]
#[error("Failed to initialize the subscribers schema.")]
pub struct SchemaInitError(#[source] pub sqlx::Error);

#[derive(thiserror::Error)]
pub enum StoreError {
    #[error("A subscriber with email {0} already exists.")]
    DuplicateKey(String),
    #[error("Failed to execute a query against the subscriber store.")]
    StorageUnavailable(#[source] sqlx::Error),
    #[error("Failed to decode a subscriber row.")]
    Decode(#[from] RecordDecodeError),
}

#[derive(thiserror::Error)]
pub enum RecordDecodeError {
    #[error("Column {column} is missing or has an unexpected type.")]
    Column {
        column: &'static str,
        #[source]
        source: sqlx::Error,
    },
    #[error("Stored email is not valid: {0}")]
    InvalidEmail(String),
    #[error("Stored confirmation timestamp {0} is out of range.")]
    InvalidConfirmedAt(i64),
    #[error("Stored opted out flag {0} is neither 0 nor 1.")]
    InvalidOptedOut(i64),
}

impl StoreError {
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, StoreError::DuplicateKey(_))
    }

    pub fn is_storage_unavailable(&self) -> bool {
        matches!(self, StoreError::StorageUnavailable(_))
    }
}

fn error_chain_fmt(e: &impl std::error::Error, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    writeln!(f, "{}", e)?;
    let mut current = e.source();

    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }

    Ok(())
}

impl std::fmt::Debug for SchemaInitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl std::fmt::Debug for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl std::fmt::Debug for RecordDecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
