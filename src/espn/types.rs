//! League history payload types.
//!
//! Only the fields the importer needs are typed; unknown keys are ignored,
//! except inside `settings`, which is kept whole so it can be stored as-is.

use crate::{cli::types::time::Season, error::HistoryError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};


/// One season snapshot from `/leagueHistory/{leagueId}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryEntry {
    #[serde(rename = "seasonId")]
    pub season_id: Season,
    pub settings: LeagueSettings,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub teams: Vec<TeamEntry>,
}

/// League settings object. `name` is required, the rest is opaque.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LeagueSettings {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LeagueSettings {
    /// The full settings object, `name` included.
    pub fn to_value(&self) -> Value {
        let mut object = self.extra.clone();
        object.insert("name".to_string(), Value::String(self.name.clone()));
        Value::Object(object)
    }
}

/// A league member (a person with an ESPN account).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Member {
    pub id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

/// A team within one season.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TeamEntry {
    pub abbrev: String,
    /// Member ids; the first one is treated as the team's manager.
    #[serde(default)]
    pub owners: Vec<String>,
}

impl TeamEntry {
    pub fn primary_owner(&self) -> Option<&str> {
        self.owners.first().map(String::as_str)
    }
}

/// Decode raw season documents, failing on the first one missing a required key.
pub fn parse_history(values: Vec<Value>) -> Result<Vec<HistoryEntry>> {
    values
        .into_iter()
        .enumerate()
        .map(|(idx, value)| {
            serde_json::from_value(value)
                .map_err(|e| HistoryError::malformed(format!("season record {idx}: {e}")))
        })
        .collect()
}
