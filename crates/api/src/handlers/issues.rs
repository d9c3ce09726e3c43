//! Handlers for the `/api/issues/{project}` resource.
//!
//! The project segment is trimmed before use. Update and delete fold every
//! failure (unknown id, malformed id, storage fault) into one reply so
//! callers cannot tell them apart.

use axum::extract::{Path, State};
use axum::Json;
use tracker_core::error::CoreError;
use tracker_core::types::parse_issue_id;
use tracker_db::models::issue::Issue;

use crate::error::AppResult;
use crate::extract::{IssueBody, ListQuery};
use crate::response::{
    ActionReply, CreateReply, COULD_NOT_DELETE, COULD_NOT_UPDATE, MISSING_ID, NO_UPDATE_FIELDS,
    REQUIRED_FIELDS_MISSING, SUCCESSFULLY_DELETED, SUCCESSFULLY_UPDATED,
};
use crate::state::AppState;

/// GET /api/issues/{project}
///
/// Equality filters come from the query string. A filter on `_id` or `open`
/// that cannot match anything short-circuits to an empty list.
pub async fn list(
    State(state): State<AppState>,
    Path(project): Path<String>,
    ListQuery(params): ListQuery,
) -> AppResult<Json<Vec<Issue>>> {
    let project = project.trim().to_string();

    let Some(filter) = params.into_filter(project) else {
        tracing::debug!("Issue filter cannot match any record");
        return Ok(Json(Vec::new()));
    };

    let issues = state.store.find(&filter).await?;
    tracing::debug!(project = %filter.project, count = issues.len(), "Issues listed");

    Ok(Json(issues))
}

/// POST /api/issues/{project}
pub async fn create(
    State(state): State<AppState>,
    Path(project): Path<String>,
    IssueBody(form): IssueBody,
) -> AppResult<Json<CreateReply>> {
    let input = match form.new_issue(&project) {
        Ok(input) => input,
        Err(CoreError::Validation(reason)) => {
            tracing::debug!(%reason, "Issue rejected");
            return Ok(Json(CreateReply::Rejected(ActionReply::error(
                REQUIRED_FIELDS_MISSING,
            ))));
        }
    };

    let issue = state.store.insert(input).await?;
    tracing::info!(project = %issue.project, issue_id = %issue.id, "Issue created");

    Ok(Json(CreateReply::Created(issue)))
}

/// PUT /api/issues/{project}
pub async fn update(
    State(state): State<AppState>,
    Path(project): Path<String>,
    IssueBody(form): IssueBody,
) -> Json<ActionReply> {
    let project = project.trim();

    let Some(raw_id) = form.id() else {
        return Json(ActionReply::error(MISSING_ID));
    };

    let changes = form.changes();
    if changes.is_empty() {
        return Json(ActionReply::error_for(NO_UPDATE_FIELDS, raw_id));
    }

    let Some(id) = parse_issue_id(&raw_id) else {
        tracing::debug!(%raw_id, "Update targeted a malformed issue id");
        return Json(ActionReply::error_for(COULD_NOT_UPDATE, raw_id));
    };

    match state.store.find_one_and_update(project, id, &changes).await {
        Ok(Some(_)) => {
            tracing::info!(project, issue_id = %id, "Issue updated");
            Json(ActionReply::success(SUCCESSFULLY_UPDATED, raw_id))
        }
        Ok(None) => {
            tracing::debug!(project, issue_id = %id, "Update matched no issue");
            Json(ActionReply::error_for(COULD_NOT_UPDATE, raw_id))
        }
        Err(err) => {
            tracing::error!(error = %err, project, issue_id = %id, "Issue update failed");
            Json(ActionReply::error_for(COULD_NOT_UPDATE, raw_id))
        }
    }
}

/// DELETE /api/issues/{project}
pub async fn delete(
    State(state): State<AppState>,
    Path(project): Path<String>,
    IssueBody(form): IssueBody,
) -> Json<ActionReply> {
    let project = project.trim();

    let Some(raw_id) = form.id() else {
        return Json(ActionReply::error(MISSING_ID));
    };

    let Some(id) = parse_issue_id(&raw_id) else {
        tracing::debug!(%raw_id, "Delete targeted a malformed issue id");
        return Json(ActionReply::error_for(COULD_NOT_DELETE, raw_id));
    };

    match state.store.delete_one(project, id).await {
        Ok(removed) if removed > 0 => {
            tracing::info!(project, issue_id = %id, "Issue deleted");
            Json(ActionReply::success(SUCCESSFULLY_DELETED, raw_id))
        }
        Ok(_) => {
            tracing::debug!(project, issue_id = %id, "Delete matched no issue");
            Json(ActionReply::error_for(COULD_NOT_DELETE, raw_id))
        }
        Err(err) => {
            tracing::error!(error = %err, project, issue_id = %id, "Issue delete failed");
            Json(ActionReply::error_for(COULD_NOT_DELETE, raw_id))
        }
    }
}
