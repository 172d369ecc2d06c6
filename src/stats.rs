use serde::Serialize;

/// Repository with the highest commit count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MostActive {
    pub name: String,
    pub commit_count: u64,
}

/// Language listed by the most repositories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MostUsed {
    pub language: String,
    pub repositories: u64,
}

/// Totals derived from the current record collection.
///
/// `None` means "no data", which is not the same as a zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateSummary {
    pub total_repositories: u64,
    pub total_commits: u64,
    pub total_stars: u64,
    pub total_forks: u64,
    pub distinct_languages: u64,
    pub highest_commit_count: u64,
    pub average_commits: u64,
    pub most_active_repository: Option<MostActive>,
    pub most_used_language: Option<MostUsed>,
}
