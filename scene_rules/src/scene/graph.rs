//! Connection Graph - the world topology the encounter walks.

use log::debug;
use serde::Serialize;
use std::collections::HashMap;

use super::{Connection, ConnectionId, Location, LocationId};
use crate::error::{SceneError, SceneResult};

/// Locations plus the typed edges between them.
///
/// Built once at world setup and only read afterwards. Connections touching a
/// location are reported in insertion order, so traversal is deterministic for
/// a fixed graph.
///
/// Only `add_location` and `add_connection` (or a world definition) can fill
/// it, so every stored edge has passed validation. For that reason the graph
/// serializes but has no `Deserialize`.
#[derive(Debug, Clone, Serialize, Default)]
pub struct ConnectionGraph {
    locations: HashMap<LocationId, Location>,

    /// All connections; `ConnectionId` is the index.
    connections: Vec<Connection>,

    /// Index: location -> connections touching it, in insertion order.
    by_location: HashMap<LocationId, Vec<ConnectionId>>,
}

impl ConnectionGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a location to the graph, replacing any previous entry with the same ID.
    pub fn add_location(&mut self, location: Location) -> LocationId {
        let id = location.id;
        self.locations.insert(id, location);
        self.by_location.entry(id).or_default();
        id
    }

    /// Add a validated connection.
    ///
    /// Both endpoints must exist and differ, and every group name must be
    /// declared on the endpoint it is seen from.
    pub fn add_connection(&mut self, connection: Connection) -> SceneResult<ConnectionId> {
        let outgoing = self.location(connection.outgoing)?;
        let incoming = self.location(connection.incoming)?;

        if outgoing.id == incoming.id {
            return Err(SceneError::SelfConnection(outgoing.id));
        }

        for (location, group) in [
            (outgoing, connection.outgoing_group.as_deref()),
            (incoming, connection.incoming_group.as_deref()),
        ] {
            if let Some(group) = group {
                if !location.has_connection_group(group) {
                    return Err(SceneError::UndeclaredGroup {
                        location: location.id,
                        group: group.to_string(),
                    });
                }
            }
        }

        let id = ConnectionId(self.connections.len());
        debug!(
            "connecting {} -> {} ({:?})",
            connection.outgoing, connection.incoming, connection.directionality
        );
        self.by_location
            .entry(connection.outgoing)
            .or_default()
            .push(id);
        self.by_location
            .entry(connection.incoming)
            .or_default()
            .push(id);
        self.connections.push(connection);
        Ok(id)
    }

    /// Get a location by ID.
    pub fn location(&self, id: LocationId) -> SceneResult<&Location> {
        self.locations
            .get(&id)
            .ok_or(SceneError::LocationNotFound(id))
    }

    /// All connections touching a location, in insertion order.
    pub fn connections_of(
        &self,
        id: LocationId,
    ) -> SceneResult<impl Iterator<Item = &Connection> + '_> {
        let ids = self
            .by_location
            .get(&id)
            .ok_or(SceneError::LocationNotFound(id))?;
        Ok(ids.iter().filter_map(|cid| self.connections.get(cid.0)))
    }

    /// Connections for which the location is the outgoing endpoint.
    pub fn outgoing(&self, id: LocationId) -> SceneResult<Vec<&Connection>> {
        Ok(self
            .connections_of(id)?
            .filter(|c| c.outgoing == id)
            .collect())
    }

    /// Connections for which the location is the incoming endpoint.
    pub fn incoming(&self, id: LocationId) -> SceneResult<Vec<&Connection>> {
        Ok(self
            .connections_of(id)?
            .filter(|c| c.incoming == id)
            .collect())
    }

    /// Get the total number of locations.
    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    /// Get the total number of connections.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}
