use async_trait::async_trait;
use tracker_core::types::IssueId;

use crate::error::StoreError;
use crate::models::issue::{Issue, IssueChanges, IssueFilter, NewIssue};
use crate::repositories::IssueRepo;
use crate::store::IssueStore;
use crate::DbPool;

/// PostgreSQL-backed store. Queries live in [`IssueRepo`].
#[derive(Clone)]
pub struct PgIssueStore {
    pool: DbPool,
}

impl PgIssueStore {
    /// Wrap an existing pool. The schema must already be migrated.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a pool, check connectivity, and apply migrations.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = crate::create_pool(database_url, max_connections).await?;
        tracing::info!(max_connections, "Database connection pool created");

        crate::health_check(&pool).await?;
        tracing::info!("Database health check passed");

        crate::run_migrations(&pool).await?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }
}

#[async_trait]
impl IssueStore for PgIssueStore {
    async fn find(&self, filter: &IssueFilter) -> Result<Vec<Issue>, StoreError> {
        Ok(IssueRepo::list(&self.pool, filter).await?)
    }

    async fn insert(&self, issue: NewIssue) -> Result<Issue, StoreError> {
        Ok(IssueRepo::create(&self.pool, &issue).await?)
    }

    async fn find_one_and_update(
        &self,
        project: &str,
        id: IssueId,
        changes: &IssueChanges,
    ) -> Result<Option<Issue>, StoreError> {
        Ok(IssueRepo::update(&self.pool, project, id, changes).await?)
    }

    async fn delete_one(&self, project: &str, id: IssueId) -> Result<u64, StoreError> {
        Ok(IssueRepo::delete(&self.pool, project, id).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
