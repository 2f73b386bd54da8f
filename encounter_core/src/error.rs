//! Errors raised by the encounter controller.

use scene_rules::SceneError;

use crate::combat::CombatEngineError;

/// Alias for `Result<T, EncounterError>`.
pub type EncounterResult<T> = Result<T, EncounterError>;

/// Text shown to the player whenever a turn has to be aborted.
pub const SAFE_RESPONSE: &str = "Something went wrong. Your master looks at you, puzzled.";

/// Everything here is a defect in world data, configuration or wiring.
/// Player mistakes are narrative branches, never errors.
#[derive(Debug, thiserror::Error)]
pub enum EncounterError {
    /// A referenced location is missing from the world graph.
    #[error(transparent)]
    NotFound(#[from] SceneError),

    /// No master covers the level; the master table is misconfigured.
    #[error("no master bracket covers level {level}")]
    NoBracketMatch { level: u32 },

    /// The master table is not total and non-overlapping over its domain.
    #[error("invalid master table: {0}")]
    InvalidMasterTable(String),

    /// The gate or combat wiring was bypassed.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// The combat engine refused to start the fight.
    #[error(transparent)]
    CombatEngine(#[from] CombatEngineError),

    /// Configuration could not be parsed.
    #[error("failed to parse encounter configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl EncounterError {
    /// Generic text the host should show instead of the error details.
    pub fn player_message(&self) -> &'static str {
        SAFE_RESPONSE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene_rules::LocationId;

    #[test]
    fn test_scene_error_converts() {
        let id = LocationId::new();
        let err: EncounterError = SceneError::LocationNotFound(id).into();
        assert!(matches!(err, EncounterError::NotFound(SceneError::LocationNotFound(_))));
        assert_eq!(err.to_string(), format!("location not found: {}", id));
    }

    #[test]
    fn test_player_message_hides_details() {
        let err = EncounterError::NoBracketMatch { level: 99 };
        assert_eq!(err.to_string(), "no master bracket covers level 99");
        assert_eq!(err.player_message(), SAFE_RESPONSE);
    }
}
