//! record.rs
//!
//! Turns the loosely shaped JSON coming back from the activity endpoint into
//! fully populated `RepositoryRecord`s.
//!
//! The backend emits `repo` / `commits` / `languages` / `stars` / `forks`.
//! Older payloads used `name` / `commitCount`, so both spellings are read.
//! Nothing is ever dropped here: a missing or malformed field falls back to
//! its default and the record is kept.

use serde::Serialize;
use serde_json::Value;

/// Marker the backend uses when it has no language data for a repository.
pub const NO_LANGUAGES: &str = "N/A";

/// Separator between language names in the `languages` field.
pub const LANGUAGE_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryRecord {
    pub name: String,
    pub commit_count: u64,
    pub languages: String,
    pub stars: u64,
    pub forks: u64,
}

impl Default for RepositoryRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            commit_count: 0,
            languages: NO_LANGUAGES.to_string(),
            stars: 0,
            forks: 0,
        }
    }
}

impl RepositoryRecord {
    /// Individual language names, in the order the backend listed them.
    ///
    /// Tokens are trimmed and empty ones dropped. The sentinel, or a list
    /// with nothing left in it, comes back as a single `"N/A"` token.
    pub fn language_tokens(&self) -> Vec<&str> {
        let tokens: Vec<&str> = self
            .languages
            .split(LANGUAGE_SEPARATOR)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();

        if tokens.is_empty() {
            vec![NO_LANGUAGES]
        } else {
            tokens
        }
    }

    pub fn has_languages(&self) -> bool {
        self.languages != NO_LANGUAGES
    }
}

/// Normalize a whole payload.
///
/// Anything other than a JSON array yields no records; the client rejects
/// such payloads before they get here.
pub fn normalize(payload: &Value) -> Vec<RepositoryRecord> {
    match payload.as_array() {
        Some(entries) => entries.iter().map(normalize_entry).collect(),
        None => Vec::new(),
    }
}

/// Normalize a single entry. Non-object entries become a default record.
pub fn normalize_entry(entry: &Value) -> RepositoryRecord {
    let Some(obj) = entry.as_object() else {
        return RepositoryRecord::default();
    };

    let name = obj
        .get("repo")
        .or_else(|| obj.get("name"))
        .and_then(Value::as_str)
        .map(clean_label)
        .unwrap_or_default();

    let commit_count = count_field(obj.get("commits").or_else(|| obj.get("commitCount")));

    let languages = obj
        .get("languages")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| NO_LANGUAGES.to_string());

    RepositoryRecord {
        name,
        commit_count,
        languages,
        stars: count_field(obj.get("stars")),
        forks: count_field(obj.get("forks")),
    }
}

/// Strip carriage returns and newlines, then trim surrounding whitespace.
pub fn clean_label(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .collect::<String>()
        .trim()
        .to_string()
}

// Counts are non-negative integers. Negative numbers clamp to zero, positive
// fractions truncate, and anything that is not a JSON number counts as zero.
fn count_field(value: Option<&Value>) -> u64 {
    let Some(value) = value else {
        return 0;
    };

    if let Some(n) = value.as_u64() {
        return n;
    }

    match value.as_f64() {
        Some(f) if f.is_finite() && f > 0.0 => f.trunc() as u64,
        _ => 0,
    }
}
