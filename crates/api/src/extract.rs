//! Request-body extraction for the issue routes.
//!
//! Browsers submit the issue forms as `application/x-www-form-urlencoded`
//! while API clients send JSON. [`IssueBody`] accepts either and yields the
//! same [`IssueForm`]. A request without a body (typical for a bare DELETE)
//! yields an empty form so the handler can report the missing `_id` itself.
//! [`ListQuery`] wraps the listing filters so a bad query string is reported
//! as JSON too.

use std::borrow::Cow;

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::{Form, Json};
use serde::Deserialize;
use tracker_core::error::CoreError;
use tracker_core::issue::{normalize_text, open_on_create, parse_flag, require_text};
use tracker_db::models::issue::{IssueChanges, IssueListParams, NewIssue};

use crate::error::AppError;

/// A single submitted value.
///
/// Form bodies only ever carry text; JSON bodies may also carry booleans and
/// numbers, which are rendered back to text before normalization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl FormValue {
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FormValue::Bool(b) => Cow::Owned(b.to_string()),
            FormValue::Number(n) => Cow::Owned(n.to_string()),
            FormValue::Text(s) => Cow::Borrowed(s),
        }
    }
}

/// The recognized fields of an issue submission. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueForm {
    #[serde(rename = "_id")]
    pub id: Option<FormValue>,
    pub issue_title: Option<FormValue>,
    pub issue_text: Option<FormValue>,
    pub created_by: Option<FormValue>,
    pub assigned_to: Option<FormValue>,
    pub status_text: Option<FormValue>,
    pub open: Option<FormValue>,
}

fn text(value: &Option<FormValue>) -> Option<Cow<'_, str>> {
    value.as_ref().map(FormValue::as_text)
}

impl IssueForm {
    /// The submitted `_id` exactly as sent, or `None` when absent or blank.
    pub fn id(&self) -> Option<String> {
        text(&self.id)
            .filter(|id| !id.trim().is_empty())
            .map(Cow::into_owned)
    }

    /// Validate and normalize a creation request for `project`.
    ///
    /// Fails with [`CoreError::Validation`] when the project or any required
    /// field is absent or blank.
    pub fn new_issue(&self, project: &str) -> Result<NewIssue, CoreError> {
        Ok(NewIssue {
            project: require_text("project", Some(project))?,
            issue_title: require_text("issue_title", text(&self.issue_title).as_deref())?,
            issue_text: require_text("issue_text", text(&self.issue_text).as_deref())?,
            created_by: require_text("created_by", text(&self.created_by).as_deref())?,
            assigned_to: normalize_text(text(&self.assigned_to).as_deref()).unwrap_or_default(),
            status_text: normalize_text(text(&self.status_text).as_deref()).unwrap_or_default(),
            open: open_on_create(text(&self.open).as_deref()),
        })
    }

    /// The mutable fields supplied with a non-blank value.
    ///
    /// Text is trimmed; `open` is kept only when it reads as a boolean.
    pub fn changes(&self) -> IssueChanges {
        IssueChanges {
            issue_title: normalize_text(text(&self.issue_title).as_deref()),
            issue_text: normalize_text(text(&self.issue_text).as_deref()),
            created_by: normalize_text(text(&self.created_by).as_deref()),
            assigned_to: normalize_text(text(&self.assigned_to).as_deref()),
            status_text: normalize_text(text(&self.status_text).as_deref()),
            open: text(&self.open).as_deref().and_then(parse_flag),
        }
    }
}

/// Extractor accepting a form-encoded or JSON [`IssueForm`].
pub struct IssueBody(pub IssueForm);

impl<S> FromRequest<S> for IssueBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase);

        match content_type.as_deref() {
            Some(ct) if ct.starts_with("application/json") => {
                let Json(form) = Json::<IssueForm>::from_request(req, state)
                    .await
                    .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
                Ok(Self(form))
            }
            Some(ct) if ct.starts_with("application/x-www-form-urlencoded") => {
                let Form(form) = Form::<IssueForm>::from_request(req, state)
                    .await
                    .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
                Ok(Self(form))
            }
            _ => {
                let body = Bytes::from_request(req, state)
                    .await
                    .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
                if body.iter().all(u8::is_ascii_whitespace) {
                    Ok(Self(IssueForm::default()))
                } else {
                    Err(AppError::BadRequest(
                        "Expected a form-encoded or JSON request body".into(),
                    ))
                }
            }
        }
    }
}

/// Extractor for the listing filters in the query string.
pub struct ListQuery(pub IssueListParams);

impl<S> FromRequestParts<S> for ListQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<IssueListParams>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Self(params))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn form(pairs: serde_json::Value) -> IssueForm {
        serde_json::from_value(pairs).unwrap()
    }

    #[test]
    fn json_scalars_are_rendered_as_text() {
        let f = form(serde_json::json!({"open": false, "issue_title": 42}));
        assert_eq!(f.open, Some(FormValue::Bool(false)));
        assert_eq!(text(&f.issue_title).as_deref(), Some("42"));
        assert_eq!(text(&f.open).as_deref(), Some("false"));
    }

    #[test]
    fn null_and_unknown_keys_are_ignored() {
        let f = form(serde_json::json!({"assigned_to": null, "priority": "high"}));
        assert!(f.assigned_to.is_none());
    }

    #[test]
    fn new_issue_trims_and_fills_defaults() {
        let f = form(serde_json::json!({
            "issue_title": "  Title  ",
            "issue_text": "Text",
            "created_by": " alice",
        }));
        let issue = f.new_issue(" apitest ").unwrap();
        assert_eq!(issue.project, "apitest");
        assert_eq!(issue.issue_title, "Title");
        assert_eq!(issue.created_by, "alice");
        assert_eq!(issue.assigned_to, "");
        assert_eq!(issue.status_text, "");
        assert!(issue.open);
    }

    #[test]
    fn new_issue_requires_every_required_field() {
        let f = form(serde_json::json!({"issue_title": "t", "issue_text": "   "}));
        assert_matches!(f.new_issue("apitest"), Err(CoreError::Validation(_)));

        let complete = form(serde_json::json!({
            "issue_title": "t", "issue_text": "x", "created_by": "c"
        }));
        assert_matches!(complete.new_issue("  "), Err(CoreError::Validation(_)));
    }

    #[test]
    fn changes_skip_blank_and_non_boolean_values() {
        let f = form(serde_json::json!({
            "_id": "abc",
            "issue_title": "",
            "status_text": " done ",
            "open": "perhaps",
        }));
        let changes = f.changes();
        assert!(changes.issue_title.is_none());
        assert_eq!(changes.status_text.as_deref(), Some("done"));
        assert!(changes.open.is_none());
        assert!(!changes.is_empty());
    }

    #[test]
    fn id_is_echoed_verbatim_unless_blank() {
        assert_eq!(form(serde_json::json!({"_id": " x1 "})).id().as_deref(), Some(" x1 "));
        assert!(form(serde_json::json!({"_id": "  "})).id().is_none());
        assert!(IssueForm::default().id().is_none());
    }
}
