//! The boundary with the external combat engine.

use scene_rules::{CharacterState, EntityId, LocationId};
use serde::{Deserialize, Serialize};

use crate::action::ActionGroups;
use crate::masters::Master;

/// Distinguishes the yard's fights from every other combat in the game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextTag(pub String);

impl ContextTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContextTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One side of a fight, as far as narration needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: EntityId,
    pub display_name: String,
}

impl Combatant {
    pub fn new(id: EntityId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }
}

impl From<&CharacterState> for Combatant {
    fn from(character: &CharacterState) -> Self {
        Self::new(character.id, character.name.clone())
    }
}

impl From<&Master> for Combatant {
    fn from(master: &Master) -> Self {
        Self::new(master.id, master.name.clone())
    }
}

/// Everything the combat engine needs to start a fight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatRequest {
    pub attacker: Combatant,
    pub defender: Combatant,
    pub context: ContextTag,
    /// Where the fight starts and where navigation is restored afterwards.
    pub origin: LocationId,
}

/// Outcome reported by the combat engine once a fight is over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatResult {
    pub winner: Combatant,
    pub loser: Combatant,
    /// Location the fight was initiated from.
    pub referrer: LocationId,
}

/// The combat engine refused or failed to start a fight.
#[derive(Debug, thiserror::Error)]
#[error("combat engine failed to start combat: {0}")]
pub struct CombatEngineError(pub String);

/// Port to the external combat engine.
///
/// Every successful `start_combat` is expected to be followed by exactly one
/// conclusion carrying the same context tag.
#[cfg_attr(test, mockall::automock)]
pub trait CombatEngine {
    /// Begin a fight and return the combat-specific actions to show instead of
    /// the location's normal navigation.
    fn start_combat(&mut self, request: CombatRequest) -> Result<ActionGroups, CombatEngineError>;
}

/// Continuation token for a fight the yard started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatHandle {
    pub context: ContextTag,
    pub character: EntityId,
    pub master: Master,
    pub origin: LocationId,
}
