//! Test case sets, one per (task, version) pair

use crate::error::{CasebenchError, StoreResult};
use crate::model::{TestCase, TestCasePatch};
use std::collections::HashMap;

/// Test case sets keyed by task and version
#[derive(Debug, Default)]
pub struct CaseStore {
    sets: HashMap<String, HashMap<String, Vec<TestCase>>>,
}

impl CaseStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole case set of a (task, version) pair
    pub fn replace(&mut self, task_id: &str, version_id: &str, cases: Vec<TestCase>) {
        tracing::debug!(task_id, version_id, count = cases.len(), "Replaced case set");
        self.sets
            .entry(task_id.to_string())
            .or_default()
            .insert(version_id.to_string(), cases);
    }

    /// Cases of a (task, version) pair; empty when nothing was stored
    pub fn cases(&self, task_id: &str, version_id: &str) -> &[TestCase] {
        self.sets
            .get(task_id)
            .and_then(|versions| versions.get(version_id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Applies a patch to one case and returns the updated value
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the case id is not in the set.
    pub fn update(
        &mut self,
        task_id: &str,
        version_id: &str,
        case_id: &str,
        patch: &TestCasePatch,
    ) -> StoreResult<TestCase> {
        let cases = self
            .sets
            .get_mut(task_id)
            .and_then(|versions| versions.get_mut(version_id))
            .ok_or_else(|| CasebenchError::not_found("test case", case_id))?;
        let index = cases
            .iter()
            .position(|c| c.id == case_id)
            .ok_or_else(|| CasebenchError::not_found("test case", case_id))?;

        let updated = cases[index].apply(patch);
        cases[index] = updated.clone();
        Ok(updated)
    }

    /// Drops every case set of a task, returning how many sets were removed
    pub fn remove_task(&mut self, task_id: &str) -> usize {
        self.sets.remove(task_id).map(|v| v.len()).unwrap_or(0)
    }
}
