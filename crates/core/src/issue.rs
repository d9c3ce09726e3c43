//! Field rules for issue records.
//!
//! Everything here is pure: trimming, required-field checks, and the text to
//! boolean coercion applied to the `open` flag. The HTTP layer feeds raw
//! request values in and the storage layer receives the normalized result.

use crate::error::CoreError;

const TRUE_TOKENS: [&str; 3] = ["true", "1", "yes"];
const FALSE_TOKENS: [&str; 3] = ["false", "0", "no"];

/// Coerce text to a boolean.
///
/// Accepts `true`/`1`/`yes` and `false`/`0`/`no` (after trimming, case
/// sensitive). Returns `None` for anything else.
pub fn parse_flag(raw: &str) -> Option<bool> {
    let value = raw.trim();
    if TRUE_TOKENS.contains(&value) {
        Some(true)
    } else if FALSE_TOKENS.contains(&value) {
        Some(false)
    } else {
        None
    }
}

/// Trim a text value, treating blank input the same as absent input.
pub fn normalize_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Trim a required text value, failing when it is absent or blank.
pub fn require_text(field: &str, raw: Option<&str>) -> Result<String, CoreError> {
    normalize_text(raw).ok_or_else(|| CoreError::Validation(format!("{field} is required")))
}

/// Resolve the `open` flag of a newly created issue.
///
/// Absent, blank, and unrecognized values leave the issue open; only an
/// explicit false-equivalent closes it.
pub fn open_on_create(raw: Option<&str>) -> bool {
    raw.and_then(parse_flag).unwrap_or(true)
}
