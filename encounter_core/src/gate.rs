//! Encounter Gate - who may face the master this cycle.

use log::debug;
use scene_rules::CharacterState;
use serde::{Deserialize, Serialize};

/// Eligibility for the daily master encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateState {
    IneligibleDead,
    /// Level is above the ceiling.
    IneligibleTooExperienced,
    IneligibleAlreadyEngaged,
    Eligible,
}

impl GateState {
    pub fn is_eligible(&self) -> bool {
        matches!(self, GateState::Eligible)
    }
}

/// Evaluates eligibility fresh on every visit.
#[derive(Debug, Clone, Copy)]
pub struct EncounterGate {
    ceiling: u32,
}

impl EncounterGate {
    pub fn new(ceiling: u32) -> Self {
        Self { ceiling }
    }

    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    /// First matching condition wins: dead, too experienced, already engaged.
    pub fn evaluate(&self, character: &CharacterState) -> GateState {
        let state = if !character.is_alive() {
            GateState::IneligibleDead
        } else if character.level() > self.ceiling {
            GateState::IneligibleTooExperienced
        } else if character.has_engaged_encounter_today() {
            GateState::IneligibleAlreadyEngaged
        } else {
            GateState::Eligible
        };
        debug!("gate for {} (level {}): {:?}", character.name, character.level(), state);
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> EncounterGate {
        EncounterGate::new(15)
    }

    #[test]
    fn test_eligible() {
        let c = CharacterState::new("Fresh").with_level(5);
        assert_eq!(gate().evaluate(&c), GateState::Eligible);
        assert!(gate().evaluate(&c).is_eligible());
    }

    #[test]
    fn test_each_ineligible_state() {
        let dead = CharacterState::new("Dead").with_health(0);
        assert_eq!(gate().evaluate(&dead), GateState::IneligibleDead);

        let veteran = CharacterState::new("Veteran").with_level(16);
        assert_eq!(gate().evaluate(&veteran), GateState::IneligibleTooExperienced);

        let engaged = CharacterState::new("Eager").with_encounter_engaged(true);
        assert_eq!(gate().evaluate(&engaged), GateState::IneligibleAlreadyEngaged);
    }

    #[test]
    fn test_ceiling_is_inclusive() {
        let c = CharacterState::new("Edge").with_level(15);
        assert_eq!(gate().evaluate(&c), GateState::Eligible);
    }

    #[test]
    fn test_dead_beats_everything() {
        let c = CharacterState::new("Everything")
            .with_health(0)
            .with_level(40)
            .with_encounter_engaged(true);
        assert_eq!(gate().evaluate(&c), GateState::IneligibleDead);
    }

    #[test]
    fn test_too_experienced_beats_engaged() {
        let c = CharacterState::new("Old")
            .with_level(16)
            .with_encounter_engaged(true);
        assert_eq!(gate().evaluate(&c), GateState::IneligibleTooExperienced);
    }

    #[test]
    fn test_deterministic_over_state_space() {
        for health in [-1, 0, 1] {
            for level in [1, 15, 16] {
                for engaged in [false, true] {
                    let c = CharacterState::new("Probe")
                        .with_health(health)
                        .with_level(level)
                        .with_encounter_engaged(engaged);
                    assert_eq!(gate().evaluate(&c), gate().evaluate(&c));
                }
            }
        }
    }
}
