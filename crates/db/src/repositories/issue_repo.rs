//! Repository for the `issues` table.

use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracker_core::types::{new_issue_id, IssueId};

use crate::models::issue::{Issue, IssueChanges, IssueFilter, NewIssue};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project, issue_title, issue_text, created_by, \
    assigned_to, status_text, open, created_on, updated_on";

/// Provides CRUD operations for issues.
pub struct IssueRepo;

impl IssueRepo {
    /// Insert a new issue, returning the created row.
    ///
    /// The id is generated here; `created_on` and `updated_on` share one timestamp.
    pub async fn create(pool: &PgPool, input: &NewIssue) -> Result<Issue, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO issues \
                (id, project, issue_title, issue_text, created_by, \
                 assigned_to, status_text, open, created_on, updated_on) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Issue>(&query)
            .bind(new_issue_id())
            .bind(&input.project)
            .bind(&input.issue_title)
            .bind(&input.issue_text)
            .bind(&input.created_by)
            .bind(&input.assigned_to)
            .bind(&input.status_text)
            .bind(input.open)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// List issues matching every condition of `filter`, oldest first.
    pub async fn list(pool: &PgPool, filter: &IssueFilter) -> Result<Vec<Issue>, sqlx::Error> {
        let mut query =
            QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM issues WHERE project = "));
        query.push_bind(filter.project.as_str());

        if let Some(id) = filter.id {
            query.push(" AND id = ").push_bind(id);
        }
        for (column, value) in filter.text_conditions() {
            query.push(format!(" AND {column} = ")).push_bind(value);
        }
        if let Some(open) = filter.open {
            query.push(" AND open = ").push_bind(open);
        }
        query.push(" ORDER BY created_on ASC, id ASC");

        query.build_query_as::<Issue>().fetch_all(pool).await
    }

    /// Apply `changes` to the issue identified by `project` and `id`.
    ///
    /// Always refreshes `updated_on`. Returns `None` if no such issue exists.
    pub async fn update(
        pool: &PgPool,
        project: &str,
        id: IssueId,
        changes: &IssueChanges,
    ) -> Result<Option<Issue>, sqlx::Error> {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE issues SET updated_on = ");
        query.push_bind(Utc::now());

        for (column, value) in changes.text_changes() {
            query.push(format!(", {column} = ")).push_bind(value);
        }
        if let Some(open) = changes.open {
            query.push(", open = ").push_bind(open);
        }
        query
            .push(" WHERE project = ")
            .push_bind(project)
            .push(" AND id = ")
            .push_bind(id)
            .push(format!(" RETURNING {COLUMNS}"));

        query.build_query_as::<Issue>().fetch_optional(pool).await
    }

    /// Permanently delete an issue. Returns the number of rows removed.
    pub async fn delete(pool: &PgPool, project: &str, id: IssueId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM issues WHERE project = $1 AND id = $2")
            .bind(project)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
