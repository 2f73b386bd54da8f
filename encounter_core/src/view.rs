//! The structure handed to presentation after every turn.

use scene_rules::Location;
use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionGroups};

/// What the character currently sees: a title, ordered description paragraphs
/// and the grouped actions available to take.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Viewpoint {
    pub title: String,
    pub description: Vec<String>,
    pub action_groups: ActionGroups,
}

impl Viewpoint {
    /// Start a view from a location's own title and description.
    pub fn for_location(location: &Location) -> Self {
        let mut view = Self {
            title: location.title.clone(),
            ..Self::default()
        };
        view.set_description(location.description.clone());
        view
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replace all paragraphs with a single one.
    pub fn set_description(&mut self, paragraph: impl Into<String>) {
        self.description.clear();
        self.add_description_paragraph(paragraph);
    }

    /// Append a paragraph; blank text is dropped.
    pub fn add_description_paragraph(&mut self, paragraph: impl Into<String>) {
        let paragraph = paragraph.into();
        if !paragraph.trim().is_empty() {
            self.description.push(paragraph);
        }
    }

    /// Paragraphs joined the way presentation expects them.
    pub fn description_text(&self) -> String {
        self.description.join("\n\n")
    }

    pub fn has_paragraph(&self, paragraph: &str) -> bool {
        self.description.iter().any(|p| p == paragraph)
    }

    /// Replace the visible action set wholesale.
    pub fn set_action_groups(&mut self, groups: ActionGroups) {
        self.action_groups = groups;
    }

    /// Find an action by title within a named group.
    pub fn find_action(&self, group: &str, title: &str) -> Option<&Action> {
        self.action_groups
            .get(group)
            .and_then(|g| g.actions.iter().find(|a| a.title == title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs() {
        let mut view = Viewpoint::default();
        view.set_description("First.");
        view.add_description_paragraph("   ");
        view.add_description_paragraph("Second.");

        assert_eq!(view.description_text(), "First.\n\nSecond.");
        assert!(view.has_paragraph("Second."));

        view.set_description("Only.");
        assert_eq!(view.description, vec!["Only.".to_string()]);
    }

    #[test]
    fn test_for_location() {
        let location = Location::new("Village", "A quiet square.");
        let view = Viewpoint::for_location(&location);
        assert_eq!(view.title, "Village");
        assert_eq!(view.description_text(), "A quiet square.");
        assert!(view.action_groups.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let view = Viewpoint {
            title: "You won!".into(),
            description: vec!["Done.".into()],
            action_groups: ActionGroups::with_default_group(),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["title"], "You won!");
        assert_eq!(json["description"][0], "Done.");
        assert_eq!(json["action_groups"]["groups"][0]["name"], "default");
    }
}
