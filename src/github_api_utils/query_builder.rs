use crate::state_utils::{DateRange, FilterSet};
use chrono::{DateTime, Days, Months, SecondsFormat, Utc};

impl DateRange {
    /// Comparison operator used in the `pushed:` / `created:` qualifiers.
    pub fn operator(&self) -> char {
        match *self {
            DateRange::MoreThanYear => '<',
            _ => '>',
        }
    }

    /// The boundary of the range, counted back from `now`.
    pub fn boundary(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let boundary = match *self {
            DateRange::Last24Hours => now.checked_sub_days(Days::new(1)),
            DateRange::LastWeek => now.checked_sub_days(Days::new(7)),
            DateRange::LastMonth => now.checked_sub_months(Months::new(1)),
            DateRange::Last3Months => now.checked_sub_months(Months::new(3)),
            DateRange::LastYear | DateRange::MoreThanYear => now.checked_sub_months(Months::new(12)),
        };
        boundary.unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Renders e.g. `>2024-01-14T00:00:00+00:00`.
    pub fn qualifier_value(&self, now: DateTime<Utc>) -> String {
        format!(
            "{}{}",
            self.operator(),
            self.boundary(now).to_rfc3339_opts(SecondsFormat::Secs, false)
        )
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Builds the `q` parameter of a repository search.
/// Qualifiers are appended in a fixed order and only for filters that are set.
pub fn construct_query_string(text: &str, filters: &FilterSet, now: DateTime<Utc>) -> String {
    let mut query = text.to_owned();

    if let Some(language) = non_empty(&filters.language) {
        query.push_str(&format!(" language:{language}"));
    }
    if let Some(author) = non_empty(&filters.author) {
        query.push_str(&format!(" user:{author}"));
    }
    if let Some(range) = filters.last_commit {
        query.push_str(&format!(" pushed:{}", range.qualifier_value(now)));
    }
    if let Some(range) = filters.repo_created {
        query.push_str(&format!(" created:{}", range.qualifier_value(now)));
    }
    // zero is treated as unset, `>=0` would not narrow anything
    if let Some(stars) = filters.stars.filter(|n| *n > 0) {
        query.push_str(&format!(" stars:>={stars}"));
    }
    if let Some(forks) = filters.forks.filter(|n| *n > 0) {
        query.push_str(&format!(" forks:>={forks}"));
    }
    if filters.show_forked_repos {
        query.push_str(" fork:true");
    }

    debug!("Constructed query string: {}", query);
    query
}
