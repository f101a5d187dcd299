use std::cmp::Ordering;

use crate::models::contributor::ContributorRecord;
use crate::models::wall::SortKey;

/// Returns a sorted copy; `records` is left as loaded.
pub fn sort_contributors(records: &[ContributorRecord], key: SortKey) -> Vec<ContributorRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| compare(a, b, key));
    sorted
}

pub fn compare(a: &ContributorRecord, b: &ContributorRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Newest => b
            .added_at_or_empty()
            .cmp(a.added_at_or_empty())
            .then_with(|| a.name_or_empty().cmp(b.name_or_empty())),
        SortKey::Oldest => a
            .added_at_or_empty()
            .cmp(b.added_at_or_empty())
            .then_with(|| a.name_or_empty().cmp(b.name_or_empty())),
        SortKey::NameAsc => a.sort_name().cmp(b.sort_name()),
        SortKey::NameDesc => b.sort_name().cmp(a.sort_name()),
    }
}
