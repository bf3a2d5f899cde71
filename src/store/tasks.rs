//! Task history and chat transcripts

use crate::error::{CasebenchError, StoreResult};
use crate::model::{Message, Sender, Task};
use std::sync::Arc;
use tokio::sync::watch;

/// Ordered collection of tasks plus the single active-task pointer
///
/// Every mutation builds a new value for the changed task, swaps it in at
/// its index and publishes the whole collection as one snapshot to
/// subscribers.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    active: Option<String>,
    next_id: u64,
    snapshots: watch::Sender<Arc<Vec<Task>>>,
}

impl TaskStore {
    /// Creates an empty store
    pub fn new() -> Self {
        let (snapshots, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            tasks: Vec::new(),
            active: None,
            next_id: 1,
            snapshots,
        }
    }

    /// All tasks in insertion order
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up a task without changing the active pointer
    pub fn get(&self, id: &str) -> StoreResult<&Task> {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| CasebenchError::not_found("task", id))
    }

    /// The active task, if any
    pub fn active(&self) -> Option<&Task> {
        let id = self.active.as_deref()?;
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Id of the active task, if any
    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Creates a task with the next free numeric id and appends it
    pub fn create(&mut self, title: impl Into<String>, date: impl Into<String>) -> Task {
        let id = self.allocate_id();
        let task = Task::new(id, title, date);
        tracing::debug!(task_id = %task.id, "Created task");
        self.tasks.push(task.clone());
        self.publish();
        task
    }

    /// Appends an existing task, keeping its id
    ///
    /// # Errors
    ///
    /// Returns `Validation` if a task with the same id is already stored.
    pub fn insert(&mut self, task: Task) -> StoreResult<()> {
        if self.tasks.iter().any(|t| t.id == task.id) {
            return Err(CasebenchError::Validation(format!(
                "task id already exists: {}",
                task.id
            )));
        }
        if let Ok(n) = task.id.parse::<u64>() {
            self.next_id = self.next_id.max(n + 1);
        }
        self.tasks.push(task);
        self.publish();
        Ok(())
    }

    /// Marks a task active and returns it
    pub fn select(&mut self, id: &str) -> StoreResult<&Task> {
        let index = self.index_of(id)?;
        self.active = Some(id.to_string());
        tracing::debug!(task_id = id, "Selected task");
        Ok(&self.tasks[index])
    }

    /// Removes a task and returns it
    ///
    /// If the removed task was active, the first remaining task becomes
    /// active (or none when the store is now empty).
    pub fn delete(&mut self, id: &str) -> StoreResult<Task> {
        let index = self.index_of(id)?;
        let removed = self.tasks.remove(index);
        if self.active.as_deref() == Some(id) {
            self.active = self.tasks.first().map(|t| t.id.clone());
        }
        tracing::debug!(task_id = id, active = ?self.active, "Deleted task");
        self.publish();
        Ok(removed)
    }

    /// Appends a message to a task's transcript and returns it
    ///
    /// # Errors
    ///
    /// Returns `Validation` for blank content and `NotFound` for an unknown
    /// task.
    pub fn append_message(
        &mut self,
        task_id: &str,
        content: impl Into<String>,
        sender: Sender,
    ) -> StoreResult<Message> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(CasebenchError::Validation(
                "message content cannot be empty".to_string(),
            ));
        }
        let index = self.index_of(task_id)?;

        let message = Message::new(content, sender);
        let mut updated = self.tasks[index].clone();
        updated.messages.push(message.clone());
        self.replace(index, updated);

        Ok(message)
    }

    /// The transcript of a task in insertion order
    pub fn messages(&self, task_id: &str) -> StoreResult<&[Message]> {
        Ok(&self.get(task_id)?.messages)
    }

    /// Records the number of test cases in a task's active version
    pub fn set_case_count(&mut self, task_id: &str, case_count: usize) -> StoreResult<()> {
        let index = self.index_of(task_id)?;
        let mut updated = self.tasks[index].clone();
        updated.case_count = case_count;
        self.replace(index, updated);
        Ok(())
    }

    /// Subscribe to collection snapshots published after each mutation
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Task>>> {
        self.snapshots.subscribe()
    }

    fn allocate_id(&mut self) -> String {
        while self.tasks.iter().any(|t| t.id == self.next_id.to_string()) {
            self.next_id += 1;
        }
        let id = self.next_id.to_string();
        self.next_id += 1;
        id
    }

    fn index_of(&self, id: &str) -> StoreResult<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CasebenchError::not_found("task", id))
    }

    fn replace(&mut self, index: usize, task: Task) {
        self.tasks[index] = task;
        self.publish();
    }

    fn publish(&self) {
        self.snapshots.send_replace(Arc::new(self.tasks.clone()));
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn store_with(ids: &[&str]) -> TaskStore {
        let mut store = TaskStore::new();
        for id in ids {
            store
                .insert(Task::new(*id, format!("Task {}", id), "2023-09-15"))
                .unwrap();
        }
        store
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let store = store_with(&["3", "1", "2"]);
        let ids: Vec<&str> = store.list().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let mut store = store_with(&["1"]);
        let err = store
            .insert(Task::new("1", "Again", "2023-09-15"))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_create_skips_seeded_ids() {
        let mut store = store_with(&["1", "2", "4"]);
        let task = store.create("Generated", "2024-01-01");
        assert_eq!(task.id, "5");
        let next = store.create("Generated again", "2024-01-01");
        assert_eq!(next.id, "6");
    }

    #[test]
    fn test_select_unknown_task_fails() {
        let mut store = store_with(&["1"]);
        let err = store.select("9").unwrap_err();
        assert!(err.is_not_found());
        assert!(store.active_id().is_none());
    }

    #[test]
    fn test_select_marks_single_active_task() {
        let mut store = store_with(&["1", "2"]);
        store.select("1").unwrap();
        store.select("2").unwrap();
        assert_eq!(store.active_id(), Some("2"));
        assert_eq!(store.active().unwrap().title, "Task 2");
    }

    #[test]
    fn test_delete_then_select_is_not_found() {
        let mut store = store_with(&["1", "2"]);
        store.delete("1").unwrap();
        assert!(store.select("1").unwrap_err().is_not_found());
        assert!(store.delete("1").unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_active_moves_to_first_remaining() {
        let mut store = store_with(&["1", "2", "3"]);
        store.select("2").unwrap();
        store.delete("2").unwrap();
        assert_eq!(store.active_id(), Some("1"));
    }

    #[test]
    fn test_delete_inactive_keeps_active() {
        let mut store = store_with(&["1", "2", "3"]);
        store.select("3").unwrap();
        store.delete("1").unwrap();
        assert_eq!(store.active_id(), Some("3"));
    }

    #[test]
    fn test_delete_only_task_leaves_store_empty() {
        let mut store = store_with(&["1"]);
        store.select("1").unwrap();
        store.delete("1").unwrap();
        assert!(store.list().is_empty());
        assert!(store.active().is_none());
    }

    #[test]
    fn test_append_messages_keep_call_order_and_unique_ids() {
        let mut store = store_with(&["1"]);
        let contents = ["first", "second", "third", "fourth"];
        for (i, content) in contents.iter().enumerate() {
            let sender = if i % 2 == 0 { Sender::User } else { Sender::Ai };
            store.append_message("1", *content, sender).unwrap();
        }

        let messages = store.messages("1").unwrap();
        let got: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(got, contents);

        let ids: HashSet<&str> = messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids.len(), contents.len());
    }

    #[test]
    fn test_append_message_validation() {
        let mut store = store_with(&["1"]);
        assert!(store
            .append_message("1", "   ", Sender::User)
            .unwrap_err()
            .is_validation());
        assert!(store
            .append_message("2", "hello", Sender::User)
            .unwrap_err()
            .is_not_found());
        assert!(store.messages("1").unwrap().is_empty());
    }

    #[test]
    fn test_mutations_publish_snapshots() {
        let mut store = store_with(&["1"]);
        let mut rx = store.subscribe();
        assert_eq!(rx.borrow_and_update().len(), 1);

        store.append_message("1", "hello", Sender::User).unwrap();
        assert!(rx.has_changed().unwrap());
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot[0].messages.len(), 1);

        store.set_case_count("1", 7).unwrap();
        assert_eq!(rx.borrow_and_update()[0].case_count, 7);
    }
}
