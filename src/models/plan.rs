use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Goals, Meals, Profile};

/// The unit of persistence: meals, goals and profile.
///
/// Fields missing from stored JSON fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub meals: Meals,

    #[serde(default)]
    pub goals: Goals,

    #[serde(default)]
    pub profile: Profile,
}

/// A named snapshot in the saved-plans collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPlan {
    pub name: String,

    /// When the plan was last saved.
    #[serde(with = "iso_millis")]
    pub date: DateTime<Utc>,

    #[serde(flatten)]
    pub plan: Plan,
}

impl SavedPlan {
    pub fn new(name: impl Into<String>, plan: Plan, date: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            date,
            plan,
        }
    }
}

/// Which storage scope the active view edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Bound to the current-plan scope; edits persist immediately.
    #[default]
    Main,
    /// Bound to a named saved plan; edits stay in memory until re-saved.
    Isolated { name: String },
}

impl ViewMode {
    pub fn is_isolated(&self) -> bool {
        matches!(self, ViewMode::Isolated { .. })
    }

    pub fn plan_name(&self) -> Option<&str> {
        match self {
            ViewMode::Main => None,
            ViewMode::Isolated { name } => Some(name),
        }
    }
}

/// ISO-8601 timestamps with millisecond precision (`2026-01-31T08:00:00.000Z`).
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|d| d.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
