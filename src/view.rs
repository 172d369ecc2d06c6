//! view.rs
//!
//! Reshapes aggregation output for the rendering surfaces. No new numbers
//! are computed here beyond presentation concerns (ordering, truncation,
//! percentage labels).

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::aggregate::{Aggregates, LanguageFrequency, rank_by_commits};
use crate::record::{RepositoryRecord, clean_label};
use crate::stats::AggregateSummary;

/// Text shown when a summary value has no data behind it.
pub const NO_DATA: &str = "N/A";

/// Repositories shown in pie/donut commit charts.
pub const PIE_REPOSITORIES: usize = 8;

/// Repositories listed next to a pie/donut chart.
pub const DETAIL_REPOSITORIES: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: u64,
}

impl ChartPoint {
    pub fn new(label: impl Into<String>, value: u64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// A chart point with its share of the series total, for pie labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharePoint {
    pub label: String,
    pub value: u64,
    pub percent: u64,
}

impl SharePoint {
    /// `"name 42%"`
    pub fn caption(&self) -> String {
        format!("{} {}%", self.label, self.percent)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum CommitOrder {
    /// Alphabetical by label, for trend-style charts.
    ByName,
    /// Highest commit count first, for ranking charts.
    #[default]
    ByCommits,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub name: String,
    pub commit_count: u64,
    pub languages: Vec<String>,
    pub stars: u64,
    pub forks: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatTile {
    pub title: &'static str,
    pub value: String,
}

impl StatTile {
    fn new(title: &'static str, value: impl ToString) -> Self {
        Self {
            title,
            value: value.to_string(),
        }
    }
}

/// Commit count per repository, labelled with the cleaned name.
pub fn commit_series(records: &[RepositoryRecord], order: CommitOrder) -> Vec<ChartPoint> {
    let to_point = |r: &RepositoryRecord| ChartPoint::new(clean_label(&r.name), r.commit_count);

    match order {
        CommitOrder::ByCommits => rank_by_commits(records).iter().map(to_point).collect(),
        CommitOrder::ByName => {
            let mut points: Vec<ChartPoint> = records.iter().map(to_point).collect();
            // case-insensitive so "Zeta" does not jump ahead of "alpha"
            points.sort_by(|a, b| a.label.to_lowercase().cmp(&b.label.to_lowercase()));
            points
        }
    }
}

/// Language distribution. With `top_n`, keeps the `n` most used languages;
/// ties keep first-encounter order.
pub fn language_series(languages: &LanguageFrequency, top_n: Option<usize>) -> Vec<ChartPoint> {
    let mut points: Vec<ChartPoint> = languages
        .iter()
        .map(|(lang, count)| ChartPoint::new(lang, count))
        .collect();

    if let Some(n) = top_n {
        points.sort_by_key(|p| std::cmp::Reverse(p.value));
        points.truncate(n);
    }

    points
}

pub fn table_rows(records: &[RepositoryRecord]) -> Vec<TableRow> {
    records
        .iter()
        .map(|r| TableRow {
            name: clean_label(&r.name),
            commit_count: r.commit_count,
            languages: r.language_tokens().into_iter().map(str::to_string).collect(),
            stars: r.stars,
            forks: r.forks,
        })
        .collect()
}

/// Overview tiles in display order.
pub fn stat_tiles(summary: &AggregateSummary) -> Vec<StatTile> {
    let most_active = summary
        .most_active_repository
        .as_ref()
        .map(|m| m.name.clone())
        .unwrap_or_else(|| NO_DATA.to_string());
    let most_used = summary
        .most_used_language
        .as_ref()
        .map(|m| m.language.clone())
        .unwrap_or_else(|| NO_DATA.to_string());

    // highest/average are meaningless without repositories
    let (highest, average) = if summary.total_repositories == 0 {
        (NO_DATA.to_string(), NO_DATA.to_string())
    } else {
        (
            summary.highest_commit_count.to_string(),
            summary.average_commits.to_string(),
        )
    };

    vec![
        StatTile::new("Total Repositories", summary.total_repositories),
        StatTile::new("Total Commits", summary.total_commits),
        StatTile::new("Active Languages", summary.distinct_languages),
        StatTile::new("Total Stars", summary.total_stars),
        StatTile::new("Total Forks", summary.total_forks),
        StatTile::new("Highest Commits", highest),
        StatTile::new("Average Commits", average),
        StatTile::new("Most Active Repository", most_active),
        StatTile::new("Most Used Language", most_used),
    ]
}

/// Whole-percent share of each point in the series total.
pub fn share_series(points: &[ChartPoint]) -> Vec<SharePoint> {
    let total: u64 = points.iter().map(|p| p.value).sum();

    points
        .iter()
        .map(|p| SharePoint {
            label: p.label.clone(),
            value: p.value,
            percent: if total == 0 {
                0
            } else {
                crate::aggregate::rounded_average(p.value.saturating_mul(100), total)
            },
        })
        .collect()
}

pub fn top_points(points: &[ChartPoint], n: usize) -> Vec<ChartPoint> {
    points.iter().take(n).cloned().collect()
}

/// Presentation knobs for [`assemble`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewOptions {
    pub commit_order: CommitOrder,
    /// `None` shows every language.
    pub language_top_n: Option<usize>,
}

/// Everything the render surfaces get for one successful fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub summary: AggregateSummary,
    pub tiles: Vec<StatTile>,
    /// Follows `ViewOptions::commit_order`.
    pub commits: Vec<ChartPoint>,
    /// Always highest commit count first, whatever the chosen order.
    pub ranked: Vec<ChartPoint>,
    pub languages: Vec<ChartPoint>,
    pub rows: Vec<TableRow>,
    pub updated_at: DateTime<Utc>,
}

/// Run the aggregation over `records` and package every view model.
pub fn assemble(
    records: &[RepositoryRecord],
    updated_at: DateTime<Utc>,
    options: &ViewOptions,
) -> DashboardView {
    let aggregates = Aggregates::compute(records);

    DashboardView {
        tiles: stat_tiles(&aggregates.summary),
        commits: commit_series(records, options.commit_order),
        ranked: aggregates
            .ranked
            .iter()
            .map(|r| ChartPoint::new(clean_label(&r.name), r.commit_count))
            .collect(),
        languages: language_series(&aggregates.languages, options.language_top_n),
        rows: table_rows(records),
        summary: aggregates.summary,
        updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::language_frequency;
    use pretty_assertions::assert_eq;

    fn repo(name: &str, commits: u64, languages: &str) -> RepositoryRecord {
        RepositoryRecord {
            name: name.to_string(),
            commit_count: commits,
            languages: languages.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_commit_series_by_commits() {
        let records = vec![repo("beta", 2, "Go"), repo("alpha", 9, "Go"), repo("gamma", 2, "Go")];

        assert_eq!(
            commit_series(&records, CommitOrder::ByCommits),
            vec![
                ChartPoint::new("alpha", 9),
                ChartPoint::new("beta", 2),
                ChartPoint::new("gamma", 2),
            ]
        );
    }

    #[test]
    fn test_commit_series_by_name() {
        let records = vec![repo("beta", 2, "Go"), repo("alpha", 9, "Go")];

        assert_eq!(
            commit_series(&records, CommitOrder::ByName),
            vec![ChartPoint::new("alpha", 9), ChartPoint::new("beta", 2)]
        );
    }

    #[test]
    fn test_commit_series_by_name_ignores_case() {
        let records = vec![repo("Zeta", 1, "Go"), repo("alpha", 2, "Go"), repo("Beta", 3, "Go")];

        let labels: Vec<_> = commit_series(&records, CommitOrder::ByName)
            .into_iter()
            .map(|p| p.label)
            .collect();
        assert_eq!(labels, vec!["alpha", "Beta", "Zeta"]);
    }

    #[test]
    fn test_assemble_ranked_ignores_commit_order() {
        let records = vec![repo("a1", 1, "Go"), repo("b2", 2, "Go"), repo("zzz-busiest", 999, "Go")];
        let options = ViewOptions {
            commit_order: CommitOrder::ByName,
            language_top_n: None,
        };

        let view = assemble(&records, Utc::now(), &options);
        assert_eq!(view.commits[0], ChartPoint::new("a1", 1));
        assert_eq!(
            view.ranked,
            vec![
                ChartPoint::new("zzz-busiest", 999),
                ChartPoint::new("b2", 2),
                ChartPoint::new("a1", 1),
            ]
        );
    }

    #[test]
    fn test_commit_series_cleans_labels() {
        let records = vec![repo("web\r\n", 1, "N/A")];
        assert_eq!(commit_series(&records, CommitOrder::default())[0].label, "web");
    }

    #[test]
    fn test_language_series_untruncated_keeps_insertion_order() {
        let freq = language_frequency(&[repo("a", 1, "Go"), repo("b", 1, "Rust, Go")]);

        assert_eq!(
            language_series(&freq, None),
            vec![ChartPoint::new("Go", 2), ChartPoint::new("Rust", 1)]
        );
    }

    #[test]
    fn test_language_series_top_n() {
        let freq = language_frequency(&[
            repo("a", 1, "C, Go"),
            repo("b", 1, "Go, Rust"),
            repo("c", 1, "Rust, Zig"),
        ]);

        assert_eq!(
            language_series(&freq, Some(2)),
            vec![ChartPoint::new("Go", 2), ChartPoint::new("Rust", 2)]
        );
        assert!(language_series(&freq, Some(0)).is_empty());
        assert_eq!(language_series(&freq, Some(10)).len(), 4);
    }

    #[test]
    fn test_table_rows_split_languages() {
        let rows = table_rows(&[repo("a", 1, "Rust, TypeScript"), repo("b", 0, "N/A")]);

        assert_eq!(rows[0].languages, vec!["Rust", "TypeScript"]);
        assert_eq!(rows[1].languages, vec!["N/A"]);
    }

    #[test]
    fn test_table_rows_drop_blank_languages() {
        let rows = table_rows(&[repo("a", 1, "Go, , Rust")]);
        assert_eq!(rows[0].languages, vec!["Go", "Rust"]);
    }

    #[test]
    fn test_stat_tiles_without_data() {
        let tiles = stat_tiles(&AggregateSummary::default());
        let value = |title: &str| {
            tiles
                .iter()
                .find(|t| t.title == title)
                .map(|t| t.value.clone())
                .unwrap()
        };

        assert_eq!(value("Total Repositories"), "0");
        assert_eq!(value("Highest Commits"), NO_DATA);
        assert_eq!(value("Most Active Repository"), NO_DATA);
        assert_eq!(value("Most Used Language"), NO_DATA);
    }

    #[test]
    fn test_stat_tiles_with_data() {
        let aggregates = Aggregates::compute(&[repo("a", 3, "Go"), repo("b", 4, "Go")]);
        let tiles = stat_tiles(&aggregates.summary);

        assert_eq!(tiles.len(), 9);
        assert_eq!(tiles[6], StatTile::new("Average Commits", 4));
        assert_eq!(tiles[7], StatTile::new("Most Active Repository", "b"));
        assert_eq!(tiles[8], StatTile::new("Most Used Language", "Go"));
    }

    #[test]
    fn test_share_series() {
        let shares = share_series(&[ChartPoint::new("a", 1), ChartPoint::new("b", 2)]);

        assert_eq!(shares[0].percent, 33);
        assert_eq!(shares[1].percent, 67);
        assert_eq!(shares[1].caption(), "b 67%");
    }

    #[test]
    fn test_share_series_zero_total() {
        let shares = share_series(&[ChartPoint::new("a", 0)]);
        assert_eq!(shares[0].percent, 0);
    }

    #[test]
    fn test_top_points() {
        let points = vec![ChartPoint::new("a", 3), ChartPoint::new("b", 2)];
        assert_eq!(top_points(&points, 1), vec![ChartPoint::new("a", 3)]);
        assert_eq!(top_points(&points, PIE_REPOSITORIES).len(), 2);
    }
}
