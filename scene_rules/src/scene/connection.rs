//! Typed edges between locations.

use serde::{Deserialize, Serialize};

use super::LocationId;

/// Whether a connection can be walked in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Directionality {
    #[default]
    Bidirectional,
    /// Only traversable from `outgoing` to `incoming`.
    Unidirectional,
}

/// Index of a connection within its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnectionId(pub usize);

/// An edge between two locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub outgoing: LocationId,
    pub incoming: LocationId,
    /// Group the edge is listed under when viewed from `outgoing`.
    pub outgoing_group: Option<String>,
    /// Group the edge is listed under when viewed from `incoming`.
    pub incoming_group: Option<String>,
    pub directionality: Directionality,
}

impl Connection {
    /// A bidirectional connection without group names.
    pub fn new(outgoing: LocationId, incoming: LocationId) -> Self {
        Self {
            outgoing,
            incoming,
            outgoing_group: None,
            incoming_group: None,
            directionality: Directionality::Bidirectional,
        }
    }

    pub fn with_outgoing_group(mut self, group: impl Into<String>) -> Self {
        self.outgoing_group = Some(group.into());
        self
    }

    pub fn with_incoming_group(mut self, group: impl Into<String>) -> Self {
        self.incoming_group = Some(group.into());
        self
    }

    pub fn unidirectional(mut self) -> Self {
        self.directionality = Directionality::Unidirectional;
        self
    }

    pub fn is_directionality(&self, directionality: Directionality) -> bool {
        self.directionality == directionality
    }

    /// Check whether `location` is one of the endpoints.
    pub fn touches(&self, location: LocationId) -> bool {
        self.outgoing == location || self.incoming == location
    }

    /// The endpoint reachable from `from` and the group it is listed under,
    /// or `None` when the edge cannot be walked from that side.
    pub fn traverse_from(&self, from: LocationId) -> Option<(LocationId, Option<&str>)> {
        if self.outgoing == from {
            Some((self.incoming, self.outgoing_group.as_deref()))
        } else if self.incoming == from && self.is_directionality(Directionality::Bidirectional) {
            Some((self.outgoing, self.incoming_group.as_deref()))
        } else {
            None
        }
    }
}
