//! Experience bookkeeping shared with the combat collaborator.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SceneError;

/// Experience needed to advance out of each level, indexed by `level - 1`.
const NEEDED_EXPERIENCE: [u64; 15] = [
    100, 400, 1002, 1912, 3140, 4707, 6641, 8985, 11795, 15143, 19121, 23840, 29437, 36071,
    43930,
];

/// Experience counters for a character.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Experience {
    pub current: u64,
    /// Overrides the table value for the character's level when set.
    pub needed: Option<u64>,
}

impl Experience {
    /// Create counters with the given current experience.
    pub fn new(current: u64) -> Self {
        Self {
            current,
            needed: None,
        }
    }

    /// Set an explicit requirement.
    pub fn with_needed(mut self, needed: u64) -> Self {
        self.needed = Some(needed);
        self
    }

    /// Experience required at `level`, honouring the override.
    pub fn needed_for(&self, level: u32) -> u64 {
        self.needed
            .unwrap_or_else(|| ExperienceTable::needed_by_level(level))
    }

    /// Whether the character has enough experience to face the master.
    pub fn has_needed(&self, level: u32) -> bool {
        self.current >= self.needed_for(level)
    }

    /// How much is still missing; zero once the requirement is met.
    pub fn remaining(&self, level: u32) -> u64 {
        self.needed_for(level).saturating_sub(self.current)
    }
}

/// A character level; never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Level(u32);

impl Level {
    /// Returns `SceneError::InvalidLevel` for zero.
    pub fn new(level: u32) -> Result<Self, SceneError> {
        if level == 0 {
            return Err(SceneError::InvalidLevel(level));
        }
        Ok(Self(level))
    }

    /// Clamp to the lowest valid level instead of failing.
    pub fn saturating(level: u32) -> Self {
        Self(level.max(1))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Level {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Level {
    type Error = SceneError;

    fn try_from(level: u32) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<Level> for u32 {
    fn from(level: Level) -> u32 {
        level.0
    }
}

/// Static lookup for per-level experience requirements.
pub struct ExperienceTable;

impl ExperienceTable {
    /// Levels beyond the table reuse the last entry.
    pub fn needed_by_level(level: u32) -> u64 {
        let index = (level.max(1) as usize - 1).min(NEEDED_EXPERIENCE.len() - 1);
        NEEDED_EXPERIENCE[index]
    }
}
