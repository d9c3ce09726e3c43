use std::sync::Arc;

use tracker_db::store::IssueStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the store sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Issue storage backend, opened once at startup and shared by every request.
    pub store: Arc<dyn IssueStore>,
}
