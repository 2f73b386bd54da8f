//! Locations and the connections between them.

mod connection;
mod graph;
mod loader;

pub use connection::*;
pub use graph::*;
pub use loader::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{SceneError, SceneResult};

/// Unique identifier for locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationId(pub Uuid);

impl LocationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Derive a stable location ID from a world-definition token.
    pub fn from_token(token: &str) -> Self {
        Self(Uuid::new_v5(&NAMESPACE_LOCATION, token.as_bytes()))
    }
}

impl Default for LocationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

const NAMESPACE_LOCATION: Uuid = Uuid::from_u128(0x2c9a_71e4_0b3f_4d6a_9e5c_13f8_b7a2_64d0);

/// Metadata for a named bucket of connections declared by a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionGroup {
    pub name: String,
    pub title: String,
}

impl ConnectionGroup {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
        }
    }
}

/// A location in the game world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub title: String,
    pub description: String,
    /// Declaration order is the display order of the groups.
    connection_groups: Vec<ConnectionGroup>,
}

impl Location {
    /// Create a location with a fresh ID.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_id(LocationId::new(), title, description)
    }

    /// Create a location with a known ID.
    pub fn with_id(
        id: LocationId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            connection_groups: Vec::new(),
        }
    }

    /// Declare a connection group. Group names are unique per location.
    pub fn add_connection_group(&mut self, group: ConnectionGroup) -> SceneResult<()> {
        if self.has_connection_group(&group.name) {
            return Err(SceneError::DuplicateGroup {
                location: self.id,
                group: group.name,
            });
        }
        self.connection_groups.push(group);
        Ok(())
    }

    /// Builder form of [`Location::add_connection_group`].
    pub fn with_connection_group(mut self, group: ConnectionGroup) -> SceneResult<Self> {
        self.add_connection_group(group)?;
        Ok(self)
    }

    pub fn connection_groups(&self) -> &[ConnectionGroup] {
        &self.connection_groups
    }

    pub fn has_connection_group(&self, name: &str) -> bool {
        self.connection_groups.iter().any(|g| g.name == name)
    }

    /// Look up a declared group and its declaration index.
    pub fn connection_group(&self, name: &str) -> Option<(usize, &ConnectionGroup)> {
        self.connection_groups
            .iter()
            .enumerate()
            .find(|(_, g)| g.name == name)
    }
}
