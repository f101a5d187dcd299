use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

/// One line of `contributors.ndjson`. Every field is optional; display code
/// supplies the fallbacks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContributorRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_badges",
        skip_serializing_if = "Option::is_none"
    )]
    pub badges: Option<Vec<Badge>>,
}

impl ContributorRecord {
    pub fn username_or_empty(&self) -> &str {
        self.username.as_deref().unwrap_or("")
    }

    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn added_at_or_empty(&self) -> &str {
        self.added_at.as_deref().unwrap_or("")
    }

    /// Name, then username, then empty. Empty strings count as missing.
    pub fn sort_name(&self) -> &str {
        non_empty(self.name.as_deref())
            .or_else(|| non_empty(self.username.as_deref()))
            .unwrap_or("")
    }

    pub fn badges(&self) -> &[Badge] {
        self.badges.as_deref().unwrap_or(&[])
    }

    /// Ids of predefined badges; these are what the badge filter matches on.
    pub fn badge_ids(&self) -> Vec<String> {
        self.badges()
            .iter()
            .filter_map(|badge| badge.id().map(str::to_string))
            .collect()
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Badge {
    Predefined(String),
    Custom(CustomBadge),
    Unknown(JsonValue),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CustomBadge {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeInfo {
    pub id: &'static str,
    pub icon: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

pub const PREDEFINED_BADGES: [BadgeInfo; 6] = [
    BadgeInfo {
        id: "first",
        icon: "🥇",
        label: "First",
        color: "#ffd700",
    },
    BadgeInfo {
        id: "core",
        icon: "⭐",
        label: "Core Team",
        color: "#667eea",
    },
    BadgeInfo {
        id: "top",
        icon: "🏆",
        label: "Top Contributor",
        color: "#f5576c",
    },
    BadgeInfo {
        id: "helper",
        icon: "🤝",
        label: "Helper",
        color: "#00f2fe",
    },
    BadgeInfo {
        id: "early",
        icon: "🌱",
        label: "Early Adopter",
        color: "#43e97b",
    },
    BadgeInfo {
        id: "milestone",
        icon: "🎯",
        label: "Milestone",
        color: "#fa709a",
    },
];

const CUSTOM_BADGE_TYPE: &str = "custom";
const DEFAULT_CUSTOM_LABEL: &str = "Custom";
const DEFAULT_CUSTOM_COLOR: &str = "#ffffff";

pub fn predefined_badge(id: &str) -> Option<&'static BadgeInfo> {
    PREDEFINED_BADGES.iter().find(|info| info.id == id)
}

/// A badge ready for display on a card.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BadgeView {
    pub class_name: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub text: String,
}

impl Badge {
    pub fn id(&self) -> Option<&str> {
        match self {
            Badge::Predefined(id) => Some(id.as_str()),
            _ => None,
        }
    }

    /// Unknown predefined ids and non-custom objects have no view.
    pub fn view(&self) -> Option<BadgeView> {
        match self {
            Badge::Predefined(id) => predefined_badge(id).map(|info| BadgeView {
                class_name: format!("badge-{}", info.id),
                label: info.label.to_string(),
                icon: Some(info.icon.to_string()),
                color: None,
                text: format!("{} {}", info.icon, info.label),
            }),
            Badge::Custom(custom) if custom.kind.as_deref() == Some(CUSTOM_BADGE_TYPE) => {
                let label = non_empty(custom.text.as_deref())
                    .unwrap_or(DEFAULT_CUSTOM_LABEL)
                    .to_string();
                let color = non_empty(custom.color.as_deref())
                    .unwrap_or(DEFAULT_CUSTOM_COLOR)
                    .to_string();
                Some(BadgeView {
                    class_name: "badge-custom".to_string(),
                    text: label.clone(),
                    label,
                    icon: None,
                    color: Some(color),
                })
            }
            _ => None,
        }
    }
}

// A `badges` value that is not an array is ignored rather than failing the line.
fn lenient_badges<'de, D>(deserializer: D) -> Result<Option<Vec<Badge>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(match value {
        Some(JsonValue::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    })
}
