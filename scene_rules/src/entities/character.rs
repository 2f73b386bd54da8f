//! Character state as seen by the training yard.

use serde::{Deserialize, Serialize};

use super::EntityId;
use crate::mechanics::{Experience, Level};

/// Persistent per-character data relevant to the daily master encounter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterState {
    pub id: EntityId,
    pub name: String,
    level: Level,
    pub health: i32,
    pub max_health: i32,

    /// Owned by the combat collaborator; read-only for the encounter.
    pub experience: Experience,

    // Only this flag is written by the encounter controller.
    has_engaged_encounter_today: bool,
}

impl CharacterState {
    /// Create a level 1 character at full health.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            level: Level::default(),
            health: 10,
            max_health: 10,
            experience: Experience::default(),
            has_engaged_encounter_today: false,
        }
    }

    /// Set the level (clamped to at least 1).
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = Level::saturating(level);
        self
    }

    /// Current level, always at least 1.
    pub fn level(&self) -> u32 {
        self.level.get()
    }

    /// Set current health.
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self
    }

    /// Set the experience counters.
    pub fn with_experience(mut self, experience: Experience) -> Self {
        self.experience = experience;
        self
    }

    /// Start from an already-engaged state, as restored from persistence.
    pub fn with_encounter_engaged(mut self, engaged: bool) -> Self {
        self.has_engaged_encounter_today = engaged;
        self
    }

    /// Check if the character is alive.
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Whether the master has already been challenged this cycle.
    pub fn has_engaged_encounter_today(&self) -> bool {
        self.has_engaged_encounter_today
    }

    /// Record that the daily encounter took place. Never clears the flag.
    pub fn mark_encounter_engaged(&mut self) {
        self.has_engaged_encounter_today = true;
    }

    /// Hook for the daily-cycle collaborator; the encounter itself never calls this.
    pub fn reset_daily_encounter(&mut self) {
        self.has_engaged_encounter_today = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_character() {
        let character = CharacterState::new("Test Hero");
        assert_eq!(character.name, "Test Hero");
        assert_eq!(character.level(), 1);
        assert!(character.is_alive());
        assert!(!character.has_engaged_encounter_today());
    }

    #[test]
    fn test_character_death() {
        let character = CharacterState::new("Doomed").with_health(0);
        assert!(!character.is_alive());
    }

    #[test]
    fn test_level_never_zero() {
        let character = CharacterState::new("Nobody").with_level(0);
        assert_eq!(character.level(), 1);
    }

    #[test]
    fn test_engagement_flag() {
        let mut character = CharacterState::new("Eager");
        character.mark_encounter_engaged();
        character.mark_encounter_engaged();
        assert!(character.has_engaged_encounter_today());

        character.reset_daily_encounter();
        assert!(!character.has_engaged_encounter_today());
    }

    #[test]
    fn test_flag_survives_serialization() {
        let character = CharacterState::new("Stored").with_encounter_engaged(true);
        let json = serde_json::to_string(&character).unwrap();
        let restored: CharacterState = serde_json::from_str(&json).unwrap();
        assert!(restored.has_engaged_encounter_today());
    }

    #[test]
    fn test_stored_level_zero_is_rejected() {
        let mut json = serde_json::to_value(CharacterState::new("Stored")).unwrap();
        json["level"] = serde_json::json!(0);
        assert!(serde_json::from_value::<CharacterState>(json).is_err());
    }
}
