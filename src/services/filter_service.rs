use crate::models::contributor::{predefined_badge, ContributorRecord};
use crate::models::wall::{FilterOutcome, ALL_BADGES};

/// What the filter looks at for one rendered card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterEntry {
    pub name: String,
    pub username: String,
    pub badges: Vec<String>,
}

impl FilterEntry {
    pub fn from_record(record: &ContributorRecord) -> Self {
        Self {
            name: record.name_or_empty().to_lowercase(),
            username: record.username_or_empty().to_lowercase(),
            badges: record.badge_ids(),
        }
    }

    /// `search` must already be lower-cased.
    pub fn matches(&self, search: &str, active_badge: &str) -> bool {
        let matches_search =
            search.is_empty() || self.name.contains(search) || self.username.contains(search);
        let matches_badge =
            active_badge == ALL_BADGES || self.badges.iter().any(|badge| badge == active_badge);
        matches_search && matches_badge
    }
}

pub fn apply(entries: &[FilterEntry], search: &str, active_badge: &str) -> FilterOutcome {
    let search = search.to_lowercase();
    let visible: Vec<bool> = entries
        .iter()
        .map(|entry| entry.matches(&search, active_badge))
        .collect();
    let visible_count = visible.iter().filter(|shown| **shown).count();
    let total = entries.len();

    FilterOutcome {
        summary: summary(visible_count, total, &search, active_badge),
        count_label: count_label(visible_count, total),
        visible,
        visible_count,
        total,
    }
}

/// Clicking the active badge again turns the filter off.
pub fn toggle_badge(active_badge: &str, clicked: &str) -> String {
    if active_badge == clicked {
        ALL_BADGES.to_string()
    } else {
        clicked.to_string()
    }
}

pub fn badge_label(id: &str) -> String {
    predefined_badge(id)
        .map(|info| info.label.to_string())
        .unwrap_or_else(|| id.to_string())
}

fn summary(visible: usize, total: usize, search: &str, active_badge: &str) -> String {
    match (active_badge == ALL_BADGES, search.is_empty()) {
        (true, true) => format!("Showing all {total} contributors"),
        (true, false) => format!("{visible} of {total} contributors match search"),
        (false, true) => format!(
            "{visible} contributors with \"{}\" badge",
            badge_label(active_badge)
        ),
        (false, false) => format!(
            "{visible} contributors with \"{}\" badge match search",
            badge_label(active_badge)
        ),
    }
}

pub fn count_label(visible: usize, total: usize) -> String {
    let plural = if visible == 1 { "" } else { "s" };
    let filtered = if visible < total { " (filtered)" } else { "" };
    format!("{visible} contributor{plural}{filtered}")
}
