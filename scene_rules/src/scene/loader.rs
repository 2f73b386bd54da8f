//! World definitions loaded from TOML.
//!
//! Locations are referred to by string tokens in the file; each token maps to a
//! stable [`LocationId`] so ids survive reloads.

use log::info;
use serde::Deserialize;
use std::collections::HashSet;

use super::{Connection, ConnectionGraph, ConnectionGroup, Directionality, Location, LocationId};
use crate::error::{SceneError, SceneResult};

/// Raw world definition as written by content authors.
#[derive(Debug, Deserialize)]
pub struct WorldDef {
    #[serde(default)]
    pub locations: Vec<LocationDef>,
    #[serde(default)]
    pub connections: Vec<ConnectionDef>,
}

#[derive(Debug, Deserialize)]
pub struct LocationDef {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub groups: Vec<ConnectionGroup>,
}

#[derive(Debug, Deserialize)]
pub struct ConnectionDef {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub from_group: Option<String>,
    #[serde(default)]
    pub to_group: Option<String>,
    #[serde(default)]
    pub directionality: Directionality,
}

impl WorldDef {
    /// Parse a world definition from TOML text.
    pub fn from_toml_str(text: &str) -> SceneResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Build the graph, resolving tokens and validating every connection.
    pub fn build(self) -> SceneResult<ConnectionGraph> {
        let mut graph = ConnectionGraph::new();
        let mut known = HashSet::new();

        for def in self.locations {
            let mut location =
                Location::with_id(LocationId::from_token(&def.id), def.title, def.description);
            for group in def.groups {
                location.add_connection_group(group)?;
            }
            graph.add_location(location);
            known.insert(def.id);
        }

        let resolve = |token: &str| {
            if known.contains(token) {
                Ok(LocationId::from_token(token))
            } else {
                Err(SceneError::UnknownToken(token.to_string()))
            }
        };

        for def in self.connections {
            let mut connection = Connection::new(resolve(&def.from)?, resolve(&def.to)?);
            connection.outgoing_group = def.from_group;
            connection.incoming_group = def.to_group;
            connection.directionality = def.directionality;
            graph.add_connection(connection)?;
        }

        info!(
            "loaded world with {} locations and {} connections",
            graph.location_count(),
            graph.connection_count()
        );
        Ok(graph)
    }
}

impl ConnectionGraph {
    /// Load a graph from a TOML world definition.
    pub fn from_toml_str(text: &str) -> SceneResult<Self> {
        WorldDef::from_toml_str(text)?.build()
    }
}
