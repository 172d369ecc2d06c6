//! aggregate.rs
//!
//! Derived collections over normalized records: the commit ranking, the
//! language frequency table and the summary totals.
//!
//! Everything here is a pure function of the record slice. Results are
//! recomputed from scratch on every refresh and never patched in place.

use std::collections::HashMap;

use serde::Serialize;

use crate::record::{NO_LANGUAGES, RepositoryRecord};
use crate::stats::{AggregateSummary, MostActive, MostUsed};

/// Language name -> number of repositories listing it.
///
/// Iteration follows first-encounter order, which is what breaks ties for
/// the most used language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LanguageFrequency {
    entries: Vec<(String, u64)>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl LanguageFrequency {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, language: &str) {
        match self.index.get(language) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(language.to_string(), self.entries.len());
                self.entries.push((language.to_string(), 1));
            }
        }
    }

    pub fn get(&self, language: &str) -> Option<u64> {
        self.index.get(language).map(|&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(lang, count)| (lang.as_str(), *count))
    }
}

/// Stable sort by commit count, highest first.
pub fn rank_by_commits(records: &[RepositoryRecord]) -> Vec<RepositoryRecord> {
    let mut ranked = records.to_vec();
    // slice::sort_by_key is stable; equal counts keep input order
    ranked.sort_by_key(|r| std::cmp::Reverse(r.commit_count));
    ranked
}

/// Count repositories per language, skipping the "N/A" sentinel.
pub fn language_frequency(records: &[RepositoryRecord]) -> LanguageFrequency {
    let mut freq = LanguageFrequency::new();

    for record in records {
        for token in record.language_tokens() {
            if token != NO_LANGUAGES {
                freq.increment(token);
            }
        }
    }

    freq
}

/// Totals, averages and the tie-broken "most" entries.
pub fn summarize(records: &[RepositoryRecord], languages: &LanguageFrequency) -> AggregateSummary {
    let mut summary = AggregateSummary {
        total_repositories: records.len() as u64,
        distinct_languages: languages.len() as u64,
        ..Default::default()
    };

    let mut most_active: Option<&RepositoryRecord> = None;

    for record in records {
        summary.total_commits = summary.total_commits.saturating_add(record.commit_count);
        summary.total_stars = summary.total_stars.saturating_add(record.stars);
        summary.total_forks = summary.total_forks.saturating_add(record.forks);

        // strict comparison: the first repository with the top count wins
        if most_active.is_none_or(|best| record.commit_count > best.commit_count) {
            most_active = Some(record);
        }
    }

    summary.most_active_repository = most_active.map(|r| MostActive {
        name: r.name.clone(),
        commit_count: r.commit_count,
    });
    summary.highest_commit_count = most_active.map(|r| r.commit_count).unwrap_or(0);
    summary.average_commits = rounded_average(summary.total_commits, summary.total_repositories);

    let mut most_used: Option<(&str, u64)> = None;
    for (language, count) in languages.iter() {
        if most_used.is_none_or(|(_, best)| count > best) {
            most_used = Some((language, count));
        }
    }
    summary.most_used_language = most_used.map(|(language, repositories)| MostUsed {
        language: language.to_string(),
        repositories,
    });

    summary
}

/// Integer average rounded half-up; an empty collection averages to zero.
pub fn rounded_average(total: u64, count: u64) -> u64 {
    if count == 0 {
        return 0;
    }
    let (total, count) = (total as u128, count as u128);
    ((2 * total + count) / (2 * count)) as u64
}

/// Everything the view layer needs, computed together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregates {
    pub ranked: Vec<RepositoryRecord>,
    pub languages: LanguageFrequency,
    pub summary: AggregateSummary,
}

impl Aggregates {
    pub fn compute(records: &[RepositoryRecord]) -> Self {
        let languages = language_frequency(records);
        let summary = summarize(records, &languages);
        Self {
            ranked: rank_by_commits(records),
            languages,
            summary,
        }
    }
}
