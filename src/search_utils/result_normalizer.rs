use crate::{
    error::SearchError,
    github_api_utils::search_repo_api_response::{GetRepoResponse, Repo},
    state_utils::{Owner, RepoSummary},
};
use chrono::{DateTime, Utc};

/// One normalized page of search results.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub items: Vec<RepoSummary>,
    pub total_count: u64,
}

fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<Utc>, SearchError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|date| date.with_timezone(&Utc))
        .map_err(|e| SearchError::Normalization(format!("invalid {field} '{value}': {e}")))
}

pub fn normalize_item(repo: Repo) -> Result<RepoSummary, SearchError> {
    Ok(RepoSummary {
        created_at: parse_timestamp("created_at", &repo.created_at)?,
        latest_commit: parse_timestamp("pushed_at", &repo.pushed_at)?,
        name: repo.name,
        description: repo.description,
        url: repo.html_url,
        stars: repo.stargazers_count,
        forks: repo.forks_count,
        language: repo.language,
        owner: Owner {
            login: repo.owner.login,
            url: repo.owner.html_url,
            picture: repo.owner.avatar_url,
        },
        open_issues: repo.open_issues,
    })
}

/// Parses a search response body. A single malformed item fails the whole page.
pub fn normalize_response(body: &str) -> Result<SearchPage, SearchError> {
    let response: GetRepoResponse =
        serde_json::from_str(body).map_err(|e| SearchError::Normalization(e.to_string()))?;
    let items = response
        .items
        .into_iter()
        .map(normalize_item)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SearchPage {
        items,
        total_count: response.total_count,
    })
}
