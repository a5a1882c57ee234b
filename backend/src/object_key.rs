//! Object key construction for uploaded files

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Basic ISO-8601 timestamp prefix, second resolution
const KEY_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Used when nothing of the client filename survives sanitizing
const FALLBACK_FILE_NAME: &str = "upload";

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.-]").expect("Invalid regex"));

/// Reduces a client-supplied filename to a safe storage key component
///
/// The name is NFKD-normalized and whatever is still non-ASCII is dropped
/// (`é` keeps its `e`), path separators become word breaks,
/// whitespace runs become `_`, anything outside `[A-Za-z0-9_.-]` is removed
/// and leading/trailing `.`/`_` are trimmed.
#[must_use]
pub fn sanitize_file_name(file_name: &str) -> String {
    let ascii: String = file_name
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if matches!(c, '/' | '\\') { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    let stripped = UNSAFE_CHARS.replace_all(&joined, "");
    let trimmed = stripped.trim_matches(|c| c == '.' || c == '_');

    if trimmed.is_empty() {
        FALLBACK_FILE_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Builds the storage key `<YYYYMMDDTHHMMSS>-<sanitized filename>`
///
/// Two uploads of the same filename within the same second map to the same key.
#[must_use]
pub fn object_key(now: DateTime<Utc>, file_name: &str) -> String {
    format!(
        "{}-{}",
        now.format(KEY_TIMESTAMP_FORMAT),
        sanitize_file_name(file_name)
    )
}
