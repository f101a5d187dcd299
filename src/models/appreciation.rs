use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppreciationKind {
    Clap,
    Heart,
    Party,
    Thanks,
    Star,
}

impl AppreciationKind {
    pub const ALL: [AppreciationKind; 5] = [
        AppreciationKind::Clap,
        AppreciationKind::Heart,
        AppreciationKind::Party,
        AppreciationKind::Thanks,
        AppreciationKind::Star,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AppreciationKind::Clap => "clap",
            AppreciationKind::Heart => "heart",
            AppreciationKind::Party => "party",
            AppreciationKind::Thanks => "thanks",
            AppreciationKind::Star => "star",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            AppreciationKind::Clap => "👏",
            AppreciationKind::Heart => "❤️",
            AppreciationKind::Party => "🎉",
            AppreciationKind::Thanks => "🙏",
            AppreciationKind::Star => "⭐",
        }
    }
}

impl fmt::Display for AppreciationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppreciationKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        AppreciationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| AppError::validation(format!("unknown appreciation type: {value}")))
    }
}

/// Reactions this browser profile has sent to one username.
///
/// `sent` and `counts` are kept as plain strings so entries written with
/// reaction types this build does not know survive a load/save cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppreciationEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub sent: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub counts: BTreeMap<String, u64>,
}

impl AppreciationEntry {
    pub fn has_sent(&self, kind: AppreciationKind) -> bool {
        self.sent.iter().any(|sent| sent == kind.as_str())
    }

    pub fn count(&self, kind: AppreciationKind) -> u64 {
        self.counts.get(kind.as_str()).copied().unwrap_or(0)
    }

    /// Sum over the known reaction types only. Saturates, since counts come
    /// from storage this process did not necessarily write.
    pub fn total(&self) -> u64 {
        AppreciationKind::ALL
            .into_iter()
            .map(|kind| self.count(kind))
            .fold(0, u64::saturating_add)
    }
}

pub type AppreciationMap = BTreeMap<String, AppreciationEntry>;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppreciationButton {
    pub kind: AppreciationKind,
    pub emoji: &'static str,
    pub count: u64,
    pub sent: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppreciationSummary {
    pub username: String,
    pub buttons: Vec<AppreciationButton>,
    pub total: u64,
    pub total_label: String,
}

impl AppreciationSummary {
    pub fn from_entry(username: &str, entry: &AppreciationEntry) -> Self {
        let buttons = AppreciationKind::ALL
            .into_iter()
            .map(|kind| AppreciationButton {
                kind,
                emoji: kind.emoji(),
                count: entry.count(kind),
                sent: entry.has_sent(kind),
            })
            .collect();
        let total = entry.total();

        Self {
            username: username.to_string(),
            buttons,
            total,
            total_label: total_label(total),
        }
    }
}

pub fn total_label(total: u64) -> String {
    let suffix = if total == 1 { "" } else { "s" };
    format!("Total: {total} appreciation{suffix}")
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
