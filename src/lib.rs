//! # GitHub activity dashboard pipeline
//!
//! Fetches per-repository GitHub activity (commit counts, languages, stars,
//! forks), normalizes it and turns it into the view models a dashboard
//! renders: ranked commit series, language distribution, stat tiles and
//! table rows.
//!
//! ```text
//! payload -> record::normalize -> aggregate -> view -> render surfaces
//! ```
//!
//! [`controller::Controller`] drives one fetch at a time against any
//! [`client::ActivitySource`]: the dashboard backend ([`client::ActivityClient`])
//! or GitHub itself ([`github::GithubClient`]).

pub mod aggregate;
pub mod client;
pub mod config;
pub mod controller;
pub mod elapsed;
pub mod error;
pub mod github;
pub mod record;
pub mod stats;
pub mod svg;
pub mod view;

pub use client::{ActivityClient, ActivitySource};
pub use controller::{Controller, FetchState};
pub use error::FetchError;
pub use record::RepositoryRecord;
pub use stats::AggregateSummary;
pub use view::{DashboardView, ViewOptions};
