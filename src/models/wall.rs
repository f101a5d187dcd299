use serde::{Deserialize, Serialize};

use crate::models::appreciation::AppreciationSummary;
use crate::models::contributor::BadgeView;

pub const ALL_BADGES: &str = "all";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    NameAsc,
    NameDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Newest,
        SortKey::Oldest,
        SortKey::NameAsc,
        SortKey::NameDesc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
        }
    }

    /// Unrecognised keys sort like `newest`.
    pub fn parse_or_default(value: &str) -> Self {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == value)
            .unwrap_or_default()
    }
}

/// Read-only view of the wall's UI state, built fresh for each snapshot.
/// `last_spotlight` is read from the spotlight picker, which owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WallState {
    pub sort_key: SortKey,
    pub search: String,
    pub active_badge: String,
    pub last_spotlight: Option<usize>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContributorCard {
    pub username: String,
    pub display_name: String,
    pub handle: String,
    pub avatar_url: String,
    pub avatar_alt: String,
    pub profile_url: String,
    pub aria_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub badges: Vec<BadgeView>,
    pub is_newest: bool,
    pub visible: bool,
    pub appreciation: AppreciationSummary,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SpotlightCard {
    pub index: usize,
    pub avatar_url: String,
    pub avatar_alt: String,
    pub display_name: String,
    pub handle: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilterOutcome {
    pub visible: Vec<bool>,
    pub visible_count: usize,
    pub total: usize,
    pub summary: String,
    pub count_label: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WallStats {
    pub total_count: usize,
    pub latest_contributor: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WallSnapshot {
    pub cards: Vec<ContributorCard>,
    pub filter: FilterOutcome,
    pub stats: WallStats,
    pub state: WallState,
}
