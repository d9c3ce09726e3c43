/// Failures surfaced by an [`IssueStore`](crate::store::IssueStore) backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Unsupported storage backend: {0}")]
    UnsupportedBackend(String),
}
