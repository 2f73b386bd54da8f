//! Action Graph Resolver - restores navigation after something replaced it.
//!
//! Walks every connection touching a location:
//! 1. **Outgoing side**: target is the incoming endpoint, listed under the outgoing group
//! 2. **Incoming side**: unidirectional edges are skipped; bidirectional ones
//!    lead back to the outgoing endpoint under the incoming group
//! 3. **Grouping**: ungrouped actions land in the default group, named groups are
//!    created on first use with the title the location declared for them

use log::debug;
use scene_rules::{ConnectionGraph, LocationId, SceneError};

use crate::action::{Action, ActionGroup, ActionGroups, DEFAULT_GROUP};
use crate::error::EncounterResult;

/// Rebuilds the full grouped action list of a location from the graph.
pub struct ActionGraphResolver<'g> {
    graph: &'g ConnectionGraph,
}

impl<'g> ActionGraphResolver<'g> {
    pub fn new(graph: &'g ConnectionGraph) -> Self {
        Self { graph }
    }

    /// Build every navigation action available at `location`.
    ///
    /// Groups and the actions inside them keep the order in which connections
    /// were encountered. The graph is not touched.
    pub fn rebuild_actions(&self, location: LocationId) -> EncounterResult<ActionGroups> {
        let scene = self.graph.location(location)?;
        let mut groups = ActionGroups::with_default_group();

        for connection in self.graph.connections_of(location)? {
            let Some((target, group_name)) = connection.traverse_from(location) else {
                debug!(
                    "skipping one-way connection {} -> {} seen from its incoming side",
                    connection.outgoing, connection.incoming
                );
                continue;
            };

            let destination = self.graph.location(target)?;
            let action = Action::navigate(target, destination.title.clone());

            if groups.contains_action(action.key()) {
                debug!("duplicate action to {} at {}", target, location);
                continue;
            }

            let group = match group_name {
                None => groups.get_or_insert_with(DEFAULT_GROUP, ActionGroup::default_group),
                Some(name) => {
                    if !groups.contains_group(name) {
                        let (index, declared) = scene.connection_group(name).ok_or_else(|| {
                            SceneError::UndeclaredGroup {
                                location,
                                group: name.to_string(),
                            }
                        })?;
                        groups.insert(ActionGroup::new(
                            name,
                            declared.title.clone(),
                            index as i32 + 1,
                        ));
                    }
                    groups.get_or_insert_with(name, || ActionGroup::new(name, "", 0))
                }
            };
            group.add_action(action);
        }

        Ok(groups)
    }
}
