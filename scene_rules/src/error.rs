//! Errors raised while building or querying the scene graph.

use crate::scene::LocationId;

/// Alias for `Result<T, SceneError>`.
pub type SceneResult<T> = Result<T, SceneError>;

/// Defects in world data. None of these are player-facing.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// The requested location does not exist in the graph.
    #[error("location not found: {0}")]
    LocationNotFound(LocationId),

    /// A connection would join a location to itself.
    #[error("connection from {0} to itself")]
    SelfConnection(LocationId),

    /// A connection names a group its endpoint never declared.
    #[error("connection group \"{group}\" is not declared on location {location}")]
    UndeclaredGroup { location: LocationId, group: String },

    /// A location declares the same connection group twice.
    #[error("connection group \"{group}\" declared twice on location {location}")]
    DuplicateGroup { location: LocationId, group: String },

    /// Levels start at 1.
    #[error("invalid level {0}")]
    InvalidLevel(u32),

    /// A world definition references a location token that was never defined.
    #[error("unknown location token \"{0}\"")]
    UnknownToken(String),

    /// The world definition could not be parsed.
    #[error("failed to parse world definition: {0}")]
    Parse(#[from] toml::de::Error),
}
