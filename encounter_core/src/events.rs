//! Inbound events from the host engine.

use scene_rules::{EntityId, LocationId};
use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionIntent};
use crate::combat::{CombatResult, ContextTag};

/// A player taking an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTurn {
    pub character_id: EntityId,
    pub destination: LocationId,
    pub intent: ActionIntent,
}

impl PlayerTurn {
    pub fn new(character_id: EntityId, destination: LocationId, intent: ActionIntent) -> Self {
        Self {
            character_id,
            destination,
            intent,
        }
    }

    /// The turn produced by choosing `action`.
    pub fn from_action(character_id: EntityId, action: &Action) -> Self {
        Self::new(character_id, action.destination, action.intent)
    }
}

/// A fight somewhere in the game has ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatConcluded {
    pub context: ContextTag,
    pub result: CombatResult,
}
