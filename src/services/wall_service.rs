use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info};

use crate::db::kv_store::KeyValueStore;
use crate::models::appreciation::{AppreciationKind, AppreciationMap, AppreciationSummary};
use crate::models::contributor::{non_empty, Badge, ContributorRecord};
use crate::models::wall::{
    ContributorCard, FilterOutcome, SortKey, SpotlightCard, WallSnapshot, WallState, WallStats,
    ALL_BADGES,
};
use crate::services::appreciation_service::AppreciationStore;
use crate::services::filter_service::{self, FilterEntry};
use crate::services::sorter::sort_contributors;
use crate::services::spotlight_service::{self, SpotlightPicker};

const PROFILE_BASE_URL: &str = "https://github.com/";

/// Sort and filter inputs. The spotlight position lives in the picker.
#[derive(Debug, Clone)]
struct ViewState {
    sort_key: SortKey,
    search: String,
    active_badge: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            sort_key: SortKey::Newest,
            search: String::new(),
            active_badge: ALL_BADGES.to_string(),
        }
    }
}

/// Owns the loaded contributors and every piece of mutable UI state.
pub struct WallController<S, R = StdRng> {
    records: Vec<ContributorRecord>,
    sorted: Vec<ContributorRecord>,
    filter_entries: Vec<FilterEntry>,
    view: ViewState,
    spotlight: SpotlightPicker<R>,
    appreciation: AppreciationStore<S>,
}

impl<S: KeyValueStore> WallController<S, StdRng> {
    pub fn new(records: Vec<ContributorRecord>, appreciation: AppreciationStore<S>) -> Self {
        Self::with_picker(records, appreciation, SpotlightPicker::new())
    }
}

impl<S: KeyValueStore, R: Rng> WallController<S, R> {
    pub fn with_picker(
        records: Vec<ContributorRecord>,
        appreciation: AppreciationStore<S>,
        spotlight: SpotlightPicker<R>,
    ) -> Self {
        let view = ViewState::default();
        let sorted = sort_contributors(&records, view.sort_key);
        let filter_entries = sorted.iter().map(FilterEntry::from_record).collect();
        info!(target: "app::wall", count = records.len(), "contributor wall ready");

        Self {
            records,
            sorted,
            filter_entries,
            view,
            spotlight,
            appreciation,
        }
    }

    pub fn records(&self) -> &[ContributorRecord] {
        &self.records
    }

    pub fn sorted(&self) -> &[ContributorRecord] {
        &self.sorted
    }

    pub fn state(&self) -> WallState {
        WallState {
            sort_key: self.view.sort_key,
            search: self.view.search.clone(),
            active_badge: self.view.active_badge.clone(),
            last_spotlight: self.spotlight.last(),
        }
    }

    pub fn appreciation(&self) -> &AppreciationStore<S> {
        &self.appreciation
    }

    /// Re-sorts from the loaded order; search and badge filter carry over.
    pub fn set_sort(&mut self, key: SortKey) -> FilterOutcome {
        debug!(target: "app::wall", sort = key.as_str(), "sort changed");
        self.view.sort_key = key;
        self.sorted = sort_contributors(&self.records, key);
        self.filter_entries = self.sorted.iter().map(FilterEntry::from_record).collect();
        self.filter()
    }

    pub fn set_search(&mut self, search: &str) -> FilterOutcome {
        self.view.search = search.to_lowercase();
        self.filter()
    }

    pub fn toggle_badge(&mut self, badge: &str) -> FilterOutcome {
        self.view.active_badge = filter_service::toggle_badge(&self.view.active_badge, badge);
        debug!(target: "app::wall", badge = %self.view.active_badge, "badge filter changed");
        self.filter()
    }

    pub fn filter(&self) -> FilterOutcome {
        filter_service::apply(
            &self.filter_entries,
            &self.view.search,
            &self.view.active_badge,
        )
    }

    /// Draws from the records in load order.
    pub fn spotlight(&mut self) -> Option<SpotlightCard> {
        self.spotlight.pick_card(&self.records)
    }

    pub fn appreciate(&self, username: &str, kind: AppreciationKind) -> Option<u64> {
        self.appreciation.record(username, kind)
    }

    pub fn stats(&self) -> WallStats {
        let newest_first = sort_contributors(&self.records, SortKey::Newest);
        WallStats {
            total_count: self.records.len(),
            latest_contributor: newest_first.first().map(|person| {
                non_empty(person.name.as_deref())
                    .or_else(|| non_empty(person.username.as_deref()))
                    .unwrap_or("Unknown")
                    .to_string()
            }),
        }
    }

    pub fn snapshot(&self) -> WallSnapshot {
        let filter = self.filter();
        let appreciation = self.appreciation.load();
        let cards = render_cards(&self.sorted, &filter.visible, &appreciation);

        WallSnapshot {
            cards,
            filter,
            stats: self.stats(),
            state: self.state(),
        }
    }
}

/// Builds the card view models for `records` in the given order.
pub fn render_cards(
    records: &[ContributorRecord],
    visible: &[bool],
    appreciation: &AppreciationMap,
) -> Vec<ContributorCard> {
    let newest = newest_contributor(records);

    records
        .iter()
        .enumerate()
        .map(|(index, person)| {
            let username = person.username_or_empty();
            let entry = appreciation.get(username).cloned().unwrap_or_default();

            ContributorCard {
                username: username.to_string(),
                display_name: spotlight_service::display_name(person),
                handle: if username.is_empty() {
                    String::new()
                } else {
                    format!("@{username}")
                },
                avatar_url: spotlight_service::avatar_url(person),
                avatar_alt: spotlight_service::avatar_alt(person),
                profile_url: profile_url(person),
                aria_label: format!(
                    "Open {} on GitHub",
                    non_empty(person.name.as_deref())
                        .or_else(|| non_empty(person.username.as_deref()))
                        .unwrap_or("contributor")
                ),
                message: non_empty(person.message.as_deref()).map(str::to_string),
                badges: person.badges().iter().filter_map(Badge::view).collect(),
                is_newest: newest.is_some_and(|latest| latest.username == person.username),
                visible: visible.get(index).copied().unwrap_or(true),
                appreciation: AppreciationSummary::from_entry(username, &entry),
            }
        })
        .collect()
}

/// First record holding the greatest `addedAt`; the NEW marker goes to every
/// card sharing its username.
fn newest_contributor(records: &[ContributorRecord]) -> Option<&ContributorRecord> {
    records.iter().fold(None, |latest, current| match latest {
        Some(latest) if current.added_at_or_empty() <= latest.added_at_or_empty() => Some(latest),
        _ => Some(current),
    })
}

fn profile_url(person: &ContributorRecord) -> String {
    if let Some(github) = non_empty(person.github.as_deref()) {
        return github.to_string();
    }
    match non_empty(person.username.as_deref()) {
        Some(username) => format!("{PROFILE_BASE_URL}{username}"),
        None => "#".to_string(),
    }
}
