//! Help listings for registered shortcuts.
//!
//! [`ShortcutRegistry::help_groups`] renders the registry's contents as
//! display-ready data for a help overlay or cheat-sheet panel: entries
//! grouped by category, with each binding broken into per-step key labels.
//! Disabled handlers are included so a help screen can gray them out rather
//! than silently omit them.

use crate::binding::Binding;
use crate::registry::ShortcutRegistry;

/// One shortcut line in a help listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortcutEntry {
    /// Display labels for the binding, one per key press. A chord renders
    /// as a single element ("Ctrl+S"); a sequence as one element per step
    /// ("G", "H").
    pub keys: Vec<String>,
    /// Human-readable action description.
    pub description: String,
    /// Component that registered the shortcut.
    pub component: String,
    /// Whether the shortcut is currently active.
    pub enabled: bool,
}

/// All help entries for one category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryGroup {
    /// The category label, exactly as registered.
    pub category: String,
    /// Entries in registration order.
    pub entries: Vec<ShortcutEntry>,
}

impl ShortcutRegistry {
    /// Render every registered shortcut as grouped help data.
    ///
    /// Groups are sorted by category name, compared case-insensitively;
    /// within a group, entries keep their registration order. The result is
    /// a snapshot and does not track later registry changes.
    pub fn help_groups(&self) -> Vec<CategoryGroup> {
        let mut groups: Vec<CategoryGroup> = Vec::new();

        for info in self.handlers() {
            let entry = ShortcutEntry {
                keys: match &info.binding {
                    Binding::Chord(chord) => vec![chord.to_string()],
                    Binding::Sequence(seq) => {
                        seq.steps().iter().map(|step| step.to_string()).collect()
                    }
                },
                description: info.description,
                component: info.component,
                enabled: info.enabled,
            };

            match groups
                .iter_mut()
                .find(|group| group.category == info.category)
            {
                Some(group) => group.entries.push(entry),
                None => groups.push(CategoryGroup {
                    category: info.category,
                    entries: vec![entry],
                }),
            }
        }

        groups.sort_by_key(|group| group.category.to_lowercase());
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Platform;
    use crate::registry::{ConflictPolicy, RegistryConfig, Shortcut};

    fn linux_registry() -> ShortcutRegistry {
        ShortcutRegistry::with_config(RegistryConfig {
            conflict_policy: ConflictPolicy::Warn,
            platform: Platform::Linux,
        })
    }

    #[test]
    fn test_help_is_empty_for_empty_registry() {
        assert!(linux_registry().help_groups().is_empty());
    }

    #[test]
    fn test_help_groups_sort_case_insensitively() {
        let registry = linux_registry();
        registry
            .register(Shortcut::chord("g", "Go", || {}).with_category("navigation"))
            .unwrap();
        registry
            .register(Shortcut::chord("ctrl+s", "Save", || {}).with_category("File"))
            .unwrap();
        registry
            .register(Shortcut::chord("ctrl+z", "Undo", || {}).with_category("Edit"))
            .unwrap();

        let groups = registry.help_groups();
        let categories: Vec<&str> = groups
            .iter()
            .map(|group| group.category.as_str())
            .collect();
        assert_eq!(categories, vec!["Edit", "File", "navigation"]);
    }

    #[test]
    fn test_help_entries_keep_registration_order_within_category() {
        let registry = linux_registry();
        registry
            .register(Shortcut::chord("ctrl+s", "Save", || {}).with_category("File"))
            .unwrap();
        registry
            .register(Shortcut::chord("ctrl+z", "Undo", || {}).with_category("Edit"))
            .unwrap();
        registry
            .register(Shortcut::chord("ctrl+o", "Open", || {}).with_category("File"))
            .unwrap();

        let groups = registry.help_groups();
        let file = groups
            .iter()
            .find(|group| group.category == "File")
            .unwrap();
        let descriptions: Vec<&str> = file
            .entries
            .iter()
            .map(|entry| entry.description.as_str())
            .collect();
        assert_eq!(descriptions, vec!["Save", "Open"]);
    }

    #[test]
    fn test_help_renders_sequence_steps_individually() {
        let registry = linux_registry();
        registry
            .register(Shortcut::sequence(&["g", "h"], "Go home", || {}))
            .unwrap();
        registry
            .register(Shortcut::chord("ctrl+shift+p", "Command palette", || {}))
            .unwrap();

        let groups = registry.help_groups();
        assert_eq!(groups.len(), 1);
        let keys: Vec<&Vec<String>> = groups[0].entries.iter().map(|entry| &entry.keys).collect();
        assert_eq!(*keys[0], vec!["G".to_string(), "H".to_string()]);
        assert_eq!(*keys[1], vec!["Ctrl+Shift+P".to_string()]);
    }

    #[test]
    fn test_help_includes_disabled_handlers() {
        let registry = linux_registry();
        registry
            .register(Shortcut::chord("ctrl+s", "Save", || {}).with_enabled(false))
            .unwrap();

        let groups = registry.help_groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].entries.len(), 1);
        assert!(!groups[0].entries[0].enabled);
    }
}
