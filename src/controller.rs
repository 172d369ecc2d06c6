//! controller.rs
//!
//! Owns the dashboard's request lifecycle:
//!
//!   Idle -> Loading -> Success | Failure
//!   Success | Failure -> Loading   (manual refresh)
//!
//! Only one fetch is ever in flight. `refresh` holds `&mut self` across the
//! await, so a second refresh cannot start until the first resolves; UIs that
//! split the cycle use `begin_refresh` / `finish` and consult `can_refresh`
//! to disable their trigger while loading.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::client::ActivitySource;
use crate::error::FetchError;
use crate::record::RepositoryRecord;
use crate::view::{DashboardView, ViewOptions, assemble};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Loading,
    Success {
        records: Vec<RepositoryRecord>,
        updated_at: DateTime<Utc>,
    },
    Failure {
        message: String,
    },
}

impl FetchState {
    pub fn name(&self) -> &'static str {
        match self {
            FetchState::Idle => "idle",
            FetchState::Loading => "loading",
            FetchState::Success { .. } => "success",
            FetchState::Failure { .. } => "failure",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }
}

pub struct Controller<S> {
    source: S,
    state: FetchState,
}

impl<S: ActivitySource> Controller<S> {
    /// A controller that has not fetched anything yet.
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: FetchState::Idle,
        }
    }

    /// Enter `Loading` right away and run the initial fetch.
    pub async fn start(source: S) -> Self {
        let mut controller = Self {
            source,
            state: FetchState::Loading,
        };
        controller.load().await;
        controller
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// False while a fetch is outstanding.
    pub fn can_refresh(&self) -> bool {
        !self.state.is_loading()
    }

    /// Move to `Loading`. Returns false, leaving the state alone, if a fetch
    /// is already outstanding.
    pub fn begin_refresh(&mut self) -> bool {
        if self.state.is_loading() {
            warn!("refresh requested while a fetch is already in flight; ignoring");
            return false;
        }
        self.transition(FetchState::Loading);
        true
    }

    /// Resolve the outstanding fetch. Ignored unless the controller is loading.
    pub fn finish(&mut self, outcome: Result<Vec<RepositoryRecord>, FetchError>) {
        if !self.state.is_loading() {
            warn!(state = self.state.name(), "fetch outcome arrived outside of loading; dropped");
            return;
        }

        let next = match outcome {
            Ok(records) => {
                info!(repositories = records.len(), "activity loaded");
                FetchState::Success {
                    records,
                    updated_at: Utc::now(),
                }
            }
            Err(e) => {
                warn!(error = %e, "error fetching GitHub activity");
                FetchState::Failure {
                    message: e.to_string(),
                }
            }
        };
        self.transition(next);
    }

    /// Full refresh cycle. A no-op while another fetch is outstanding.
    pub async fn refresh(&mut self) -> &FetchState {
        if self.begin_refresh() {
            self.load().await;
        }
        &self.state
    }

    /// View models for the current data, or `None` outside of `Success`.
    ///
    /// Aggregates are recomputed on every call.
    pub fn snapshot(&self, options: &ViewOptions) -> Option<DashboardView> {
        match &self.state {
            FetchState::Success {
                records,
                updated_at,
            } => Some(assemble(records, *updated_at, options)),
            _ => None,
        }
    }

    /// The message to show in place of the dashboard, if the last fetch failed.
    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            FetchState::Failure { message } => Some(message.as_str()),
            _ => None,
        }
    }

    async fn load(&mut self) {
        let outcome = self.source.fetch().await;
        self.finish(outcome);
    }

    fn transition(&mut self, next: FetchState) {
        info!(from = self.state.name(), to = next.name(), "fetch state");
        // the previous dataset or error is dropped here, never merged
        self.state = next;
    }
}
