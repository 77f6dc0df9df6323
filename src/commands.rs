use crate::state_utils::{events::SearchEvent, AppState, DateRange};
use std::str::FromStr;

pub const COMMAND_PREFIX: char = ':';

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("Invalid value '{value}' for :{key}"))
}

/// Empty or `-` unsets a filter.
fn optional<T: FromStr>(key: &str, value: &str) -> Result<Option<T>, String> {
    if value.is_empty() || value == "-" {
        Ok(None)
    } else {
        parse_value(key, value).map(Some)
    }
}

/// Turns a watch-mode line like `:language rust` into the event that applies it.
/// Returns `None` for lines that are search text.
pub fn parse_command(line: &str, state: &AppState) -> Option<Result<SearchEvent, String>> {
    let command = line.trim().strip_prefix(COMMAND_PREFIX)?;
    let (key, value) = match command.split_once(char::is_whitespace) {
        Some((key, value)) => (key, value.trim()),
        None => (command, ""),
    };

    let mut filters = state.filters.clone();
    let mut sorting = state.sorting.clone();
    let result = match key {
        "language" => optional(key, value).map(|v| filters.language = v),
        "author" => optional(key, value).map(|v| filters.author = v),
        "pushed" => optional::<DateRange>(key, value).map(|v| filters.last_commit = v),
        "created" => optional::<DateRange>(key, value).map(|v| filters.repo_created = v),
        "stars" => optional(key, value).map(|v| filters.stars = v),
        "forks" => optional(key, value).map(|v| filters.forks = v),
        "show-forks" => parse_value(key, value).map(|v| filters.show_forked_repos = v),
        "sort" => parse_value(key, value).map(|v| sorting.sort_type = v),
        "order" => parse_value(key, value).map(|v| sorting.order = v),
        _ => Err(format!("Unknown command :{key}")),
    };

    Some(result.map(|()| {
        if sorting != state.sorting {
            SearchEvent::UpdateSorting(sorting)
        } else {
            SearchEvent::UpdateFilters(filters)
        }
    }))
}
