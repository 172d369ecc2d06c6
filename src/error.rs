use thiserror::Error;

/// Why a fetch of the activity data failed.
///
/// The dashboard only ever shows the `Display` text; the variants exist so
/// callers and tests can tell the cases apart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Network error while fetching GitHub activity: {0}")]
    Transport(String),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// `{ "error": "..." }` from the backend, shown verbatim.
    #[error("{0}")]
    Backend(String),

    #[error("Unexpected response format: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_messages() {
        assert_eq!(FetchError::Status(503).to_string(), "HTTP error! status: 503");
        assert_eq!(
            FetchError::Backend("GitHub API error: 401".to_string()).to_string(),
            "GitHub API error: 401"
        );
        assert!(
            FetchError::Transport("connection refused".to_string())
                .to_string()
                .contains("connection refused")
        );
    }
}
