use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracker_core::types::{new_issue_id, IssueId};

use crate::error::StoreError;
use crate::models::issue::{Issue, IssueChanges, IssueFilter, NewIssue};
use crate::store::IssueStore;

/// Process-local store keeping issues in insertion order.
///
/// Writers are serialized by the lock, so concurrent updates to one issue
/// resolve as last-write-wins.
#[derive(Default)]
pub struct MemoryIssueStore {
    issues: RwLock<Vec<Issue>>,
}

impl MemoryIssueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored issues across all projects.
    pub async fn len(&self) -> usize {
        self.issues.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.issues.read().await.is_empty()
    }
}

#[async_trait]
impl IssueStore for MemoryIssueStore {
    async fn find(&self, filter: &IssueFilter) -> Result<Vec<Issue>, StoreError> {
        let issues = self.issues.read().await;
        let mut found: Vec<Issue> = issues
            .iter()
            .filter(|issue| filter.matches(issue))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.created_on.cmp(&b.created_on).then(a.id.cmp(&b.id)));
        Ok(found)
    }

    async fn insert(&self, issue: NewIssue) -> Result<Issue, StoreError> {
        let issue = issue.into_issue(new_issue_id(), Utc::now());
        self.issues.write().await.push(issue.clone());
        Ok(issue)
    }

    async fn find_one_and_update(
        &self,
        project: &str,
        id: IssueId,
        changes: &IssueChanges,
    ) -> Result<Option<Issue>, StoreError> {
        let mut issues = self.issues.write().await;
        let updated = issues
            .iter_mut()
            .find(|issue| issue.project == project && issue.id == id)
            .map(|issue| {
                changes.apply(issue, Utc::now());
                issue.clone()
            });
        Ok(updated)
    }

    async fn delete_one(&self, project: &str, id: IssueId) -> Result<u64, StoreError> {
        let mut issues = self.issues.write().await;
        let position = issues
            .iter()
            .position(|issue| issue.project == project && issue.id == id);
        Ok(match position {
            Some(index) => {
                issues.remove(index);
                1
            }
            None => 0,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn close(&self) {}
}
