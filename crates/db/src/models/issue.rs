//! Issue entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracker_core::issue::parse_flag;
use tracker_core::types::{parse_issue_id, IssueId, Timestamp};

// ---------------------------------------------------------------------------
// Entity struct (database row)
// ---------------------------------------------------------------------------

/// A row from the `issues` table.
///
/// Serialized with the identifier under `_id`, which is the key clients use
/// when addressing an issue in update and delete requests.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "_id")]
    pub id: IssueId,
    pub project: String,
    pub issue_title: String,
    pub issue_text: String,
    pub created_by: String,
    pub assigned_to: String,
    pub status_text: String,
    pub open: bool,
    pub created_on: Timestamp,
    pub updated_on: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// A normalized issue ready to be persisted. The store assigns the id and timestamps.
#[derive(Debug, Clone)]
pub struct NewIssue {
    pub project: String,
    pub issue_title: String,
    pub issue_text: String,
    pub created_by: String,
    pub assigned_to: String,
    pub status_text: String,
    pub open: bool,
}

impl NewIssue {
    /// Materialize the stored record with the given id and creation time.
    pub fn into_issue(self, id: IssueId, now: Timestamp) -> Issue {
        Issue {
            id,
            project: self.project,
            issue_title: self.issue_title,
            issue_text: self.issue_text,
            created_by: self.created_by,
            assigned_to: self.assigned_to,
            status_text: self.status_text,
            open: self.open,
            created_on: now,
            updated_on: now,
        }
    }
}

/// Partial update of an issue. Only `Some` fields are written.
#[derive(Debug, Clone, Default)]
pub struct IssueChanges {
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    pub open: Option<bool>,
}

impl IssueChanges {
    /// True when the update would not touch any field.
    pub fn is_empty(&self) -> bool {
        self.text_changes().is_empty() && self.open.is_none()
    }

    /// `(column, value)` pairs for every text field being changed.
    pub fn text_changes(&self) -> Vec<(&'static str, &str)> {
        [
            ("issue_title", &self.issue_title),
            ("issue_text", &self.issue_text),
            ("created_by", &self.created_by),
            ("assigned_to", &self.assigned_to),
            ("status_text", &self.status_text),
        ]
        .into_iter()
        .filter_map(|(column, value)| value.as_deref().map(|v| (column, v)))
        .collect()
    }

    /// Apply the changes to an in-memory record and stamp `updated_on`.
    pub fn apply(&self, issue: &mut Issue, now: Timestamp) {
        if let Some(v) = &self.issue_title {
            issue.issue_title = v.clone();
        }
        if let Some(v) = &self.issue_text {
            issue.issue_text = v.clone();
        }
        if let Some(v) = &self.created_by {
            issue.created_by = v.clone();
        }
        if let Some(v) = &self.assigned_to {
            issue.assigned_to = v.clone();
        }
        if let Some(v) = &self.status_text {
            issue.status_text = v.clone();
        }
        if let Some(open) = self.open {
            issue.open = open;
        }
        issue.updated_on = now.max(issue.updated_on);
    }
}

/// Equality conditions for listing issues. All present conditions are AND-ed.
#[derive(Debug, Clone, Default)]
pub struct IssueFilter {
    pub project: String,
    pub id: Option<IssueId>,
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    pub open: Option<bool>,
}

impl IssueFilter {
    /// A filter matching every issue of `project`.
    pub fn for_project(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            ..Default::default()
        }
    }

    /// `(column, value)` pairs for every text condition.
    pub fn text_conditions(&self) -> Vec<(&'static str, &str)> {
        [
            ("issue_title", &self.issue_title),
            ("issue_text", &self.issue_text),
            ("created_by", &self.created_by),
            ("assigned_to", &self.assigned_to),
            ("status_text", &self.status_text),
        ]
        .into_iter()
        .filter_map(|(column, value)| value.as_deref().map(|v| (column, v)))
        .collect()
    }

    /// Evaluate the filter against a record.
    pub fn matches(&self, issue: &Issue) -> bool {
        issue.project == self.project
            && self.id.map_or(true, |id| issue.id == id)
            && self.open.map_or(true, |open| issue.open == open)
            && text_eq(&self.issue_title, &issue.issue_title)
            && text_eq(&self.issue_text, &issue.issue_text)
            && text_eq(&self.created_by, &issue.created_by)
            && text_eq(&self.assigned_to, &issue.assigned_to)
            && text_eq(&self.status_text, &issue.status_text)
    }
}

fn text_eq(condition: &Option<String>, actual: &str) -> bool {
    condition.as_deref().map_or(true, |expected| expected == actual)
}

/// Query parameters accepted by the issue listing.
///
/// Values arrive as raw strings; unknown keys are ignored by serde.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueListParams {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    pub open: Option<String>,
}

impl IssueListParams {
    /// Build the storage filter for `project`.
    ///
    /// Returns `None` when a typed condition cannot match anything: an `_id`
    /// that is not a valid identifier or an `open` value that is not a boolean.
    pub fn into_filter(self, project: String) -> Option<IssueFilter> {
        let id = match self.id {
            Some(raw) => Some(parse_issue_id(&raw)?),
            None => None,
        };
        let open = match self.open {
            Some(raw) => Some(parse_flag(&raw)?),
            None => None,
        };

        Some(IssueFilter {
            project,
            id,
            issue_title: self.issue_title,
            issue_text: self.issue_text,
            created_by: self.created_by,
            assigned_to: self.assigned_to,
            status_text: self.status_text,
            open,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use tracker_core::types::new_issue_id;

    use super::*;

    fn sample(project: &str) -> Issue {
        NewIssue {
            project: project.to_string(),
            issue_title: "Title".to_string(),
            issue_text: "Text".to_string(),
            created_by: "alice".to_string(),
            assigned_to: String::new(),
            status_text: String::new(),
            open: true,
        }
        .into_issue(new_issue_id(), Utc::now())
    }

    #[test]
    fn issue_serializes_id_as_underscore_id() {
        let issue = sample("apitest");
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["_id"], issue.id.to_string());
        assert!(json.get("id").is_none());
        assert_eq!(json["open"], true);
        assert_eq!(json["assigned_to"], "");
    }

    #[test]
    fn filter_requires_matching_project() {
        let issue = sample("apitest");
        assert!(IssueFilter::for_project("apitest").matches(&issue));
        assert!(!IssueFilter::for_project("other").matches(&issue));
    }

    #[test]
    fn filter_ands_every_condition() {
        let issue = sample("apitest");
        let mut filter = IssueFilter::for_project("apitest");
        filter.id = Some(issue.id);
        filter.created_by = Some("alice".to_string());
        assert!(filter.matches(&issue));

        filter.open = Some(false);
        assert!(!filter.matches(&issue));
    }

    #[test]
    fn text_conditions_compare_literally() {
        let issue = sample("apitest");
        let mut filter = IssueFilter::for_project("apitest");
        filter.issue_title = Some(" Title".to_string());
        assert!(!filter.matches(&issue));
    }

    #[test]
    fn list_params_coerce_typed_conditions() {
        let params = IssueListParams {
            open: Some("false".to_string()),
            ..Default::default()
        };
        let filter = params.into_filter("apitest".to_string()).unwrap();
        assert_eq!(filter.open, Some(false));
        assert_eq!(filter.project, "apitest");
    }

    #[test]
    fn list_params_with_unmatchable_values_yield_no_filter() {
        let bad_id = IssueListParams {
            id: Some("not-an-id".to_string()),
            ..Default::default()
        };
        assert!(bad_id.into_filter("apitest".to_string()).is_none());

        let bad_open = IssueListParams {
            open: Some("sometimes".to_string()),
            ..Default::default()
        };
        assert!(bad_open.into_filter("apitest".to_string()).is_none());
    }

    #[test]
    fn changes_apply_only_supplied_fields() {
        let mut issue = sample("apitest");
        let before = issue.clone();
        let changes = IssueChanges {
            status_text: Some("in review".to_string()),
            open: Some(false),
            ..Default::default()
        };
        assert!(!changes.is_empty());

        changes.apply(&mut issue, Utc::now());

        assert_eq!(issue.status_text, "in review");
        assert!(!issue.open);
        assert_eq!(issue.issue_title, before.issue_title);
        assert_eq!(issue.created_on, before.created_on);
        assert!(issue.updated_on >= before.updated_on);
    }

    #[test]
    fn empty_changes_are_detected() {
        assert!(IssueChanges::default().is_empty());
    }
}
