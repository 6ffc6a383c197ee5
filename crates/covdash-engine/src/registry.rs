//! Registry of pending updates: the entries the UI lists, paired with the
//! task handle needed to cancel each one.

use std::collections::HashMap;

use crate::queue::TaskId;
use crate::updates::{ScheduledUpdate, UpdateEntry};

/// Insertion-ordered display entries plus a name → task-handle map.
///
/// Invariant: a name appears at most once, and its display entry and task
/// handle are inserted and removed together. Callers enforce uniqueness by
/// checking [`UpdateRegistry::contains`] before inserting.
#[derive(Debug, Default)]
pub struct UpdateRegistry {
    entries: Vec<UpdateEntry>,
    handles: HashMap<String, TaskId>,
}

impl UpdateRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handles.contains_key(name)
    }

    /// Record a newly scheduled update.
    pub fn insert(&mut self, update: &ScheduledUpdate, task: TaskId) {
        self.entries.push(UpdateEntry {
            title: update.name.clone(),
            content: format!("Update at {}", update.display_interval),
        });
        self.handles.insert(update.name.clone(), task);
    }

    /// Swap the task handle after a repeating update re-arms. The display
    /// entry is untouched.
    pub fn rearm(&mut self, name: &str, task: TaskId) {
        self.handles.insert(name.to_owned(), task);
    }

    /// Remove an update's display entry and task handle together.
    ///
    /// Returns the handle when the name was registered, `None` otherwise.
    pub fn remove(&mut self, name: &str) -> Option<TaskId> {
        let handle = self.handles.remove(name)?;
        if let Some(pos) = self.entries.iter().position(|entry| entry.title == name) {
            self.entries.remove(pos);
        }
        Some(handle)
    }

    /// Display entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[UpdateEntry] {
        &self.entries
    }

    /// Task handle registered under `name`, if any.
    #[must_use]
    pub fn handle(&self, name: &str) -> Option<TaskId> {
        self.handles.get(name).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::queue::TaskQueue;

    fn update(name: &str) -> ScheduledUpdate {
        ScheduledUpdate {
            name: name.to_owned(),
            display_interval: "10:30".to_owned(),
            repeat: false,
            refresh_covid: true,
            refresh_news: false,
        }
    }

    #[test]
    fn entries_keep_insertion_order() {
        let mut queue: TaskQueue<()> = TaskQueue::new();
        let mut registry = UpdateRegistry::new();
        let now = Utc::now();

        registry.insert(&update("b"), queue.schedule_after(now, 10, ()));
        registry.insert(&update("a"), queue.schedule_after(now, 5, ()));

        let titles: Vec<&str> = registry.entries().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "a"]);
    }

    #[test]
    fn entry_content_names_the_requested_time() {
        let mut queue: TaskQueue<()> = TaskQueue::new();
        let mut registry = UpdateRegistry::new();

        registry.insert(&update("a"), queue.schedule_after(Utc::now(), 10, ()));
        assert_eq!(registry.entries()[0].content, "Update at 10:30");
    }

    #[test]
    fn remove_drops_entry_and_handle_together() {
        let mut queue: TaskQueue<()> = TaskQueue::new();
        let mut registry = UpdateRegistry::new();
        let task = queue.schedule_after(Utc::now(), 10, ());

        registry.insert(&update("a"), task);
        assert_eq!(registry.remove("a"), Some(task));
        assert!(registry.is_empty());
        assert_eq!(registry.handle("a"), None);
    }

    #[test]
    fn remove_unknown_name_is_none() {
        let mut registry = UpdateRegistry::new();
        assert_eq!(registry.remove("ghost"), None);
    }

    #[test]
    fn rearm_swaps_handle_without_duplicating_entry() {
        let mut queue: TaskQueue<()> = TaskQueue::new();
        let mut registry = UpdateRegistry::new();
        let now = Utc::now();

        registry.insert(&update("a"), queue.schedule_after(now, 10, ()));
        let replacement = queue.schedule_after(now, 86_400, ());
        registry.rearm("a", replacement);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.handle("a"), Some(replacement));
    }
}
