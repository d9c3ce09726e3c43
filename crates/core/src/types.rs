/// Issue identifiers are time-ordered UUIDs (v7).
pub type IssueId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh issue identifier.
pub fn new_issue_id() -> IssueId {
    uuid::Uuid::now_v7()
}

/// Parse a caller-supplied identifier. Returns `None` when the text is not a UUID.
pub fn parse_issue_id(raw: &str) -> Option<IssueId> {
    uuid::Uuid::parse_str(raw.trim()).ok()
}
