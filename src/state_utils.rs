use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, sync::Arc};
use tokio::task::AbortHandle;

pub mod events;
pub mod store;

/// Everything the store holds.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub search: SearchState,
    pub filters: FilterSet,
    pub sorting: SortSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Success,
    Failure,
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub search_text: String,
    pub pages_loaded: u32,
    pub typing_timeout: Option<TypingTimeout>,
    pub results: Vec<RepoSummary>,
    pub total_count: u64,
    pub status: Status,
    pub error_message: Option<String>,
    // sequence number of the latest unsettled request
    pub in_flight: Option<u64>,
}

/// Handle to the pending typing timer.
/// Cancelling is a no-op once the timer fired or was already cancelled.
#[derive(Debug, Clone)]
pub struct TypingTimeout(Arc<AbortHandle>);

impl TypingTimeout {
    pub fn new(handle: AbortHandle) -> Self {
        TypingTimeout(Arc::new(handle))
    }

    pub fn cancel(&self) {
        self.0.abort();
    }
}

impl PartialEq for TypingTimeout {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateRange {
    Last24Hours,
    LastWeek,
    LastMonth,
    Last3Months,
    LastYear,
    MoreThanYear,
}

impl FromStr for DateRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last24Hours" => Ok(DateRange::Last24Hours),
            "lastWeek" => Ok(DateRange::LastWeek),
            "lastMonth" => Ok(DateRange::LastMonth),
            "last3Months" => Ok(DateRange::Last3Months),
            "lastYear" => Ok(DateRange::LastYear),
            "moreThanYear" => Ok(DateRange::MoreThanYear),
            _ => Err(format!("Unknown date range {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSet {
    pub language: Option<String>,
    pub author: Option<String>,
    pub last_commit: Option<DateRange>,
    pub repo_created: Option<DateRange>,
    pub stars: Option<u32>,
    pub forks: Option<u32>,
    #[serde(default)]
    pub show_forked_repos: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match *self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(format!("Unknown sort order {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    #[serde(rename = "type")]
    pub sort_type: String,
    pub order: SortOrder,
}

impl Default for SortSpec {
    fn default() -> Self {
        SortSpec {
            sort_type: "stars".to_owned(),
            order: SortOrder::Desc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Owner {
    pub login: String,
    pub url: String,
    pub picture: String,
}

/// A repository as the UI displays it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoSummary {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub stars: u64,
    pub forks: u64,
    pub language: Option<String>,
    pub owner: Owner,
    pub created_at: DateTime<Utc>,
    pub latest_commit: DateTime<Utc>,
    pub open_issues: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_ranges_parse_their_camel_case_names() {
        assert_eq!("last3Months".parse::<DateRange>(), Ok(DateRange::Last3Months));
        assert_eq!("moreThanYear".parse::<DateRange>(), Ok(DateRange::MoreThanYear));
        assert!("lastDecade".parse::<DateRange>().is_err());
    }

    #[test]
    fn sort_order_is_case_insensitive() {
        assert_eq!("ASC".parse::<SortOrder>(), Ok(SortOrder::Asc));
        assert_eq!(SortOrder::Desc.to_string(), "desc");
    }
}
