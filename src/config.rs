use crate::{
    error::ConfigError,
    state_utils::{FilterSet, SortSpec},
};
use std::{str::FromStr, time::Duration};

pub const DEFAULT_SEARCH_URL: &str = "https://api.github.com/search/repositories";
pub const DEFAULT_USER_AGENT: &str = "repo-search";
pub const DEFAULT_TYPING_DELAY_MS: u64 = 300;

/// Process-wide settings, read once at startup (see `.env`).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub search_url: String,
    pub username: String,
    pub password: String,
    pub user_agent: String,
    pub typing_delay: Duration,
    pub discard_stale_responses: bool,
    /// Initial filters and sorting of the session.
    pub filters: FilterSet,
    pub sorting: SortSpec,
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn optional<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(None),
    }
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let filters = FilterSet {
            language: optional(&lookup, "SEARCH_LANGUAGE")?,
            author: optional(&lookup, "SEARCH_AUTHOR")?,
            last_commit: optional(&lookup, "SEARCH_LAST_COMMIT")?,
            repo_created: optional(&lookup, "SEARCH_REPO_CREATED")?,
            stars: optional(&lookup, "SEARCH_MIN_STARS")?,
            forks: optional(&lookup, "SEARCH_MIN_FORKS")?,
            show_forked_repos: optional(&lookup, "SEARCH_SHOW_FORKS")?.unwrap_or(false),
        };
        let default_sorting = SortSpec::default();
        let sorting = SortSpec {
            sort_type: optional(&lookup, "SEARCH_SORT")?.unwrap_or(default_sorting.sort_type),
            order: optional(&lookup, "SEARCH_ORDER")?.unwrap_or(default_sorting.order),
        };

        Ok(Config {
            search_url: optional(&lookup, "GITHUB_SEARCH_URL")?
                .unwrap_or_else(|| DEFAULT_SEARCH_URL.to_owned()),
            username: required(&lookup, "GITHUB_USER_NAME")?,
            password: required(&lookup, "GITHUB_PASSWORD")?,
            user_agent: optional(&lookup, "GH_API_USER_AGENT")?
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned()),
            typing_delay: Duration::from_millis(
                optional(&lookup, "TYPING_DELAY_MS")?.unwrap_or(DEFAULT_TYPING_DELAY_MS),
            ),
            discard_stale_responses: optional(&lookup, "DISCARD_STALE_RESPONSES")?
                .unwrap_or(true),
            filters,
            sorting,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_utils::{DateRange, SortOrder};
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const CREDENTIALS: [(&str, &str); 2] =
        [("GITHUB_USER_NAME", "octocat"), ("GITHUB_PASSWORD", "hunter2")];

    #[test]
    fn defaults_apply_when_only_credentials_are_set() {
        let config = Config::from_lookup(lookup_from(&CREDENTIALS)).unwrap();
        assert_eq!(config.search_url, DEFAULT_SEARCH_URL);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.typing_delay, Duration::from_millis(300));
        assert!(config.discard_stale_responses);
        assert_eq!(config.filters, FilterSet::default());
        assert_eq!(config.sorting, SortSpec::default());
    }

    #[test]
    fn missing_password_is_reported() {
        let err = Config::from_lookup(lookup_from(&[("GITHUB_USER_NAME", "octocat")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("GITHUB_PASSWORD"));
    }

    #[test]
    fn filters_and_sorting_are_parsed() {
        let mut pairs = CREDENTIALS.to_vec();
        pairs.extend([
            ("SEARCH_LANGUAGE", "rust"),
            ("SEARCH_LAST_COMMIT", "lastMonth"),
            ("SEARCH_MIN_STARS", "50"),
            ("SEARCH_SHOW_FORKS", "true"),
            ("SEARCH_SORT", "updated"),
            ("SEARCH_ORDER", "asc"),
            ("TYPING_DELAY_MS", "150"),
            ("DISCARD_STALE_RESPONSES", "false"),
        ]);
        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.filters.language.as_deref(), Some("rust"));
        assert_eq!(config.filters.last_commit, Some(DateRange::LastMonth));
        assert_eq!(config.filters.stars, Some(50));
        assert!(config.filters.show_forked_repos);
        assert_eq!(config.sorting.sort_type, "updated");
        assert_eq!(config.sorting.order, SortOrder::Asc);
        assert_eq!(config.typing_delay, Duration::from_millis(150));
        assert!(!config.discard_stale_responses);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut pairs = CREDENTIALS.to_vec();
        pairs.push(("SEARCH_MIN_STARS", "lots"));
        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "SEARCH_MIN_STARS",
                value: "lots".to_owned()
            }
        );
    }
}
