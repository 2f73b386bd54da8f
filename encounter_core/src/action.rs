//! Actions and the groups they are presented in.

use scene_rules::LocationId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the untitled group every view starts with.
pub const DEFAULT_GROUP: &str = "default";

/// Unique identifier handed to presentation for each action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionId(pub Uuid);

impl ActionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ActionId {
    fn default() -> Self {
        Self::new()
    }
}

/// What taking an action asks of its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActionIntent {
    /// Plain movement to the destination.
    #[default]
    Navigate,
    /// Ask the master about your standing.
    Question,
    /// Fight the master.
    Challenge,
}

/// A navigable choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub id: ActionId,
    pub title: String,
    pub destination: LocationId,
    pub intent: ActionIntent,
}

impl Action {
    /// Movement to `destination`.
    pub fn navigate(destination: LocationId, title: impl Into<String>) -> Self {
        Self::new(destination, title, ActionIntent::Navigate)
    }

    pub fn new(destination: LocationId, title: impl Into<String>, intent: ActionIntent) -> Self {
        Self {
            id: ActionId::new(),
            title: title.into(),
            destination,
            intent,
        }
    }

    /// Identity used for de-duplication; ignores the per-action id and title.
    pub fn key(&self) -> (LocationId, ActionIntent) {
        (self.destination, self.intent)
    }
}

/// Ordered bucket of actions shown together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionGroup {
    pub name: String,
    pub title: String,
    /// Lower sorts first.
    pub sort_key: i32,
    pub actions: Vec<Action>,
}

impl ActionGroup {
    pub fn new(name: impl Into<String>, title: impl Into<String>, sort_key: i32) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            sort_key,
            actions: Vec::new(),
        }
    }

    /// The untitled group every view starts with.
    pub fn default_group() -> Self {
        Self::new(DEFAULT_GROUP, "", 0)
    }

    pub fn with_actions(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.actions.extend(actions);
        self
    }

    pub fn add_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn contains(&self, key: (LocationId, ActionIntent)) -> bool {
        self.actions.iter().any(|a| a.key() == key)
    }
}

/// Insertion-ordered mapping of group name to group.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ActionGroups {
    groups: Vec<ActionGroup>,
}

impl ActionGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding only the empty default group.
    pub fn with_default_group() -> Self {
        let mut groups = Self::new();
        groups.insert(ActionGroup::default_group());
        groups
    }

    /// Insert a group, replacing any group with the same name in place.
    pub fn insert(&mut self, group: ActionGroup) {
        match self.get_mut(&group.name) {
            Some(existing) => *existing = group,
            None => self.groups.push(group),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ActionGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ActionGroup> {
        self.groups.iter_mut().find(|g| g.name == name)
    }

    pub fn contains_group(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Get a group, creating it with `make` the first time it is asked for.
    pub fn get_or_insert_with<F>(&mut self, name: &str, make: F) -> &mut ActionGroup
    where
        F: FnOnce() -> ActionGroup,
    {
        let index = match self.groups.iter().position(|g| g.name == name) {
            Some(index) => index,
            None => {
                self.groups.push(make());
                self.groups.len() - 1
            }
        };
        &mut self.groups[index]
    }

    /// Check whether any group already holds an action with this key.
    pub fn contains_action(&self, key: (LocationId, ActionIntent)) -> bool {
        self.groups.iter().any(|g| g.contains(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionGroup> {
        self.groups.iter()
    }

    pub fn iter_actions(&self) -> impl Iterator<Item = &Action> {
        self.groups.iter().flat_map(|g| g.actions.iter())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in display order; ties keep insertion order.
    pub fn sorted(&self) -> Vec<&ActionGroup> {
        let mut groups: Vec<_> = self.groups.iter().collect();
        groups.sort_by_key(|g| g.sort_key);
        groups
    }
}

impl FromIterator<ActionGroup> for ActionGroups {
    fn from_iter<I: IntoIterator<Item = ActionGroup>>(iter: I) -> Self {
        let mut groups = Self::new();
        for group in iter {
            groups.insert(group);
        }
        groups
    }
}
