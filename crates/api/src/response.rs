//! Reply bodies for the issue routes.
//!
//! Every logical outcome, including rejected input and unknown ids, is sent
//! with HTTP 200 and distinguished only by the `result` / `error` keys.

use serde::Serialize;
use tracker_db::models::issue::Issue;

pub const REQUIRED_FIELDS_MISSING: &str = "required field(s) missing";
pub const MISSING_ID: &str = "missing _id";
pub const NO_UPDATE_FIELDS: &str = "no update field(s) sent";
pub const COULD_NOT_UPDATE: &str = "could not update";
pub const COULD_NOT_DELETE: &str = "could not delete";
pub const SUCCESSFULLY_UPDATED: &str = "successfully updated";
pub const SUCCESSFULLY_DELETED: &str = "successfully deleted";

/// `{result, _id}` on success, `{error}` or `{error, _id}` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionReply {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ActionReply {
    pub fn success(result: &'static str, id: impl Into<String>) -> Self {
        Self {
            result: Some(result),
            error: None,
            id: Some(id.into()),
        }
    }

    pub fn error(error: &'static str) -> Self {
        Self {
            result: None,
            error: Some(error),
            id: None,
        }
    }

    pub fn error_for(error: &'static str, id: impl Into<String>) -> Self {
        Self {
            result: None,
            error: Some(error),
            id: Some(id.into()),
        }
    }
}

/// Reply to a create request: the stored issue, or the validation error.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CreateReply {
    Created(Issue),
    Rejected(ActionReply),
}
