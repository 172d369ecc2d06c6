use std::time::Duration;

use crate::view::CommitOrder;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
pub const ACTIVITY_PATH: &str = "/api/github-activity";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_LANGUAGE_TOP_N: usize = 6;

/// Settings for one dashboard session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Base URL of the backend; the activity path is appended.
    pub api_url: String,
    pub timeout: Duration,
    pub language_top_n: Option<usize>,
    pub commit_order: CommitOrder,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            language_top_n: Some(DEFAULT_LANGUAGE_TOP_N),
            commit_order: CommitOrder::default(),
        }
    }
}

impl DashboardConfig {
    /// Full URL of the activity endpoint.
    pub fn activity_url(&self) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), ACTIVITY_PATH)
    }

    pub fn view_options(&self) -> crate::view::ViewOptions {
        crate::view::ViewOptions {
            commit_order: self.commit_order,
            language_top_n: self.language_top_n,
        }
    }
}
