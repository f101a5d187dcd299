use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::models::contributor::{non_empty, ContributorRecord};
use crate::models::wall::SpotlightCard;

const AVATAR_BASE_URL: &str = "https://avatars.githubusercontent.com/";

/// Picks a random contributor, never the same index twice in a row.
#[derive(Debug)]
pub struct SpotlightPicker<R = StdRng> {
    rng: R,
    last: Option<usize>,
}

impl SpotlightPicker<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for SpotlightPicker<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> SpotlightPicker<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng, last: None }
    }

    pub fn last(&self) -> Option<usize> {
        self.last
    }

    pub fn pick(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }

        let index = loop {
            let candidate = self.rng.gen_range(0..len);
            if len == 1 || Some(candidate) != self.last {
                break candidate;
            }
        };

        debug!(target: "app::spotlight", index, len, previous = ?self.last, "spotlight picked");
        self.last = Some(index);
        Some(index)
    }

    pub fn pick_card(&mut self, records: &[ContributorRecord]) -> Option<SpotlightCard> {
        let index = self.pick(records.len())?;
        Some(spotlight_card(index, &records[index]))
    }
}

pub fn avatar_url(record: &ContributorRecord) -> String {
    non_empty(record.avatar.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{AVATAR_BASE_URL}{}", record.username_or_empty()))
}

pub fn avatar_alt(record: &ContributorRecord) -> String {
    let who = non_empty(record.name.as_deref())
        .or_else(|| non_empty(record.username.as_deref()))
        .unwrap_or("Contributor");
    format!("{who} avatar")
}

pub fn display_name(record: &ContributorRecord) -> String {
    non_empty(record.name.as_deref())
        .unwrap_or("Anonymous")
        .to_string()
}

pub fn spotlight_card(index: usize, record: &ContributorRecord) -> SpotlightCard {
    SpotlightCard {
        index,
        avatar_url: avatar_url(record),
        avatar_alt: avatar_alt(record),
        display_name: display_name(record),
        handle: format!("@{}", record.username_or_empty()),
        message: format!(
            "\"{}\"",
            non_empty(record.message.as_deref()).unwrap_or("No message")
        ),
    }
}
