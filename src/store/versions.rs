//! Per-task version histories
//!
//! Each task has an append-only list of versions and one active pointer.

use crate::error::{CasebenchError, StoreResult};
use crate::model::Version;
use chrono::Utc;
use std::collections::HashMap;

#[derive(Debug, Default)]
struct VersionHistory {
    versions: Vec<Version>,
    active: Option<String>,
    last_seq: u32,
}

/// Per-task version histories with an active-version pointer each
///
/// Histories are append-only. Sequence numbers are tracked per task and
/// never reused.
#[derive(Debug, Default)]
pub struct VersionStore {
    histories: HashMap<String, VersionHistory>,
}

impl VersionStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Versions of a task in append order; empty for an unknown task
    pub fn list(&self, task_id: &str) -> &[Version] {
        self.histories
            .get(task_id)
            .map(|h| h.versions.as_slice())
            .unwrap_or(&[])
    }

    /// Appends a version with the next sequence number and makes it active
    ///
    /// # Examples
    ///
    /// ```
    /// use casebench::store::VersionStore;
    ///
    /// let mut store = VersionStore::new();
    /// let v1 = store.add("7", "Initial version", "Generated from PRD");
    /// let v2 = store.add("7", "Updated", "Added edge cases");
    /// assert_eq!(v1.id, "7-v1");
    /// assert_eq!(v2.id, "7-v2");
    /// assert_eq!(store.active_id("7"), Some("7-v2"));
    /// ```
    pub fn add(
        &mut self,
        task_id: &str,
        name: impl Into<String>,
        changes: impl Into<String>,
    ) -> Version {
        let history = self.histories.entry(task_id.to_string()).or_default();
        history.last_seq += 1;
        let version = Version {
            id: format!("{}-v{}", task_id, history.last_seq),
            name: name.into(),
            timestamp: Utc::now(),
            changes: changes.into(),
        };
        history.versions.push(version.clone());
        history.active = Some(version.id.clone());
        tracing::debug!(task_id, version_id = %version.id, "Added version");
        version
    }

    /// Appends a prebuilt version, keeping its id, and makes it active
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the id is already present for the task.
    pub fn insert(&mut self, task_id: &str, version: Version) -> StoreResult<()> {
        let history = self.histories.entry(task_id.to_string()).or_default();
        if history.versions.iter().any(|v| v.id == version.id) {
            return Err(CasebenchError::Validation(format!(
                "version id already exists: {}",
                version.id
            )));
        }
        if let Some(seq) = sequence_of(task_id, &version.id) {
            history.last_seq = history.last_seq.max(seq);
        }
        history.active = Some(version.id.clone());
        history.versions.push(version);
        Ok(())
    }

    /// Moves the active pointer without touching the version list
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the id is not in the task's history; the
    /// active pointer is left unchanged.
    pub fn select(&mut self, task_id: &str, version_id: &str) -> StoreResult<&Version> {
        let history = self
            .histories
            .get_mut(task_id)
            .ok_or_else(|| CasebenchError::not_found("version", version_id))?;
        let index = history
            .versions
            .iter()
            .position(|v| v.id == version_id)
            .ok_or_else(|| CasebenchError::not_found("version", version_id))?;
        history.active = Some(version_id.to_string());
        Ok(&history.versions[index])
    }

    /// The active version of a task, if any
    pub fn active(&self, task_id: &str) -> Option<&Version> {
        let history = self.histories.get(task_id)?;
        let id = history.active.as_deref()?;
        history.versions.iter().find(|v| v.id == id)
    }

    /// Id of the active version of a task, if any
    pub fn active_id(&self, task_id: &str) -> Option<&str> {
        self.histories.get(task_id)?.active.as_deref()
    }

    /// Drops a task's whole history, returning how many versions were removed
    pub fn remove_task(&mut self, task_id: &str) -> usize {
        self.histories
            .remove(task_id)
            .map(|h| h.versions.len())
            .unwrap_or(0)
    }
}

fn sequence_of(task_id: &str, version_id: &str) -> Option<u32> {
    version_id
        .strip_prefix(task_id)?
        .strip_prefix("-v")?
        .parse()
        .ok()
}
