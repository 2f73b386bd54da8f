//! Configuration for the training yard encounter.

use scene_rules::ConnectionGroup;
use serde::{Deserialize, Serialize};

use crate::combat::ContextTag;
use crate::error::EncounterResult;

/// Tunables for the encounter. Immutable once the yard is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    /// Characters above this level have nothing left to learn.
    pub level_ceiling: u32,

    /// Tag attached to every combat the yard starts.
    pub battle_context: ContextTag,

    /// Group holding the "Question Master" and "Challenge Master" actions.
    pub yard_group: ConnectionGroup,

    /// Group the way back out of the yard is listed under.
    pub back_group: ConnectionGroup,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            level_ceiling: 15,
            battle_context: ContextTag::new("training/master-challenge"),
            yard_group: ConnectionGroup::new("trainyard", "The Yard"),
            back_group: ConnectionGroup::new("back", "Back"),
        }
    }
}

impl EncounterConfig {
    /// Parse configuration from TOML; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> EncounterResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Set the level ceiling (at least 1).
    pub fn with_level_ceiling(mut self, ceiling: u32) -> Self {
        self.level_ceiling = ceiling.max(1);
        self
    }

    /// Set the battle context tag.
    pub fn with_battle_context(mut self, context: impl Into<String>) -> Self {
        self.battle_context = ContextTag::new(context);
        self
    }
}
