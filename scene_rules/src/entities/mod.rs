//! Entity definitions: identifiers and the per-character state the encounter reads.

mod character;

pub use character::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for characters and non-player fighters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Create a new random entity ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Derive a stable entity ID from a content token (e.g. a master's name).
    pub fn from_token(token: &str) -> Self {
        Self(Uuid::new_v5(&NAMESPACE_ENTITY, token.as_bytes()))
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

const NAMESPACE_ENTITY: Uuid = Uuid::from_u128(0x5f1e_3b2a_9c4d_4e8f_a1b2_6c7d_8e9f_0a1b);
