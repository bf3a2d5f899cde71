//! The workbench context object
//!
//! [`Workbench`] owns every store plus the progress emitter and is the only
//! place where cross-store rules live: deleting a task cascades to its
//! versions and case sets, swapping a version updates the task's case
//! count, and simulated generation or modification only touches state
//! after its progress run has completed.

use crate::assistant::{Assistant, CannedAssistant};
use crate::config::Config;
use crate::error::{CasebenchError, StoreResult};
use crate::fixtures::{self, SeededTask};
use crate::generator::{CaseGenerator, GenerationInput, MockGenerator};
use crate::model::{CaseFilter, Message, Sender, Task, TestCase, TestCasePatch, Version};
use crate::progress::ProgressEmitter;
use crate::store::{CaseStore, TaskStore, VersionStore};
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio_util::sync::CancellationToken;

/// AI message recorded when a generation starts
pub const GENERATING_MESSAGE: &str = "Generating test cases based on the provided input...";

const INITIAL_VERSION_NAME: &str = "Initial version";
const INITIAL_VERSION_CHANGES: &str = "Generated from PRD input";
const FEEDBACK_VERSION_NAME: &str = "Updated based on user feedback";

/// Result of one chat round trip
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    /// The user's message as stored
    pub request: Message,
    /// The assistant's reply as stored
    pub reply: Message,
    /// The version created for a change request, if any
    pub version: Option<Version>,
}

/// In-memory workbench: tasks, transcripts, versions and test cases
pub struct Workbench {
    tasks: TaskStore,
    versions: VersionStore,
    cases: CaseStore,
    progress: ProgressEmitter,
    generator: Box<dyn CaseGenerator>,
    assistant: Box<dyn Assistant>,
    reply_delay: Duration,
    change_summary_chars: usize,
    progress_feed: watch::Sender<u8>,
    shutdown: CancellationToken,
}

impl Workbench {
    /// Creates an empty workbench with the mock generator and canned assistant
    pub fn new(config: &Config) -> Self {
        Self::with_collaborators(
            config,
            Box::new(MockGenerator),
            Box::new(CannedAssistant::new()),
        )
    }

    /// Creates an empty workbench with custom collaborators
    pub fn with_collaborators(
        config: &Config,
        generator: Box<dyn CaseGenerator>,
        assistant: Box<dyn Assistant>,
    ) -> Self {
        Self {
            tasks: TaskStore::new(),
            versions: VersionStore::new(),
            cases: CaseStore::new(),
            progress: ProgressEmitter::from_config(&config.progress),
            generator,
            assistant,
            reply_delay: Duration::from_millis(config.chat.reply_delay_ms),
            change_summary_chars: config.chat.change_summary_chars,
            progress_feed: watch::channel(0).0,
            shutdown: CancellationToken::new(),
        }
    }

    /// Creates a workbench loaded with the fixture history
    pub fn seeded(config: &Config) -> StoreResult<Self> {
        let mut workbench = Self::new(config);
        for seeded in fixtures::seeded_tasks() {
            workbench.seed(seeded)?;
        }
        tracing::debug!(tasks = workbench.tasks().len(), "Seeded workbench");
        Ok(workbench)
    }

    /// Loads one prebuilt task with its versions and case sets
    ///
    /// The last version becomes the task's active version. Nothing is
    /// stored unless the task and all of its versions can be.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a task id already in use, a version id
    /// repeated within the seed, or a task that already has versions.
    pub fn seed(&mut self, seeded: SeededTask) -> StoreResult<()> {
        let task_id = seeded.task.id.clone();
        if !self.versions.list(&task_id).is_empty() {
            return Err(CasebenchError::Validation(format!(
                "task {} already has versions",
                task_id
            )));
        }
        let mut version_ids = HashSet::new();
        for (version, _) in &seeded.versions {
            if !version_ids.insert(version.id.as_str()) {
                return Err(CasebenchError::Validation(format!(
                    "version id already exists: {}",
                    version.id
                )));
            }
        }

        self.tasks.insert(seeded.task)?;
        for (version, cases) in seeded.versions {
            let version_id = version.id.clone();
            self.versions.insert(&task_id, version)?;
            self.cases.replace(&task_id, &version_id, cases);
        }
        Ok(())
    }

    /// All tasks in history order
    pub fn tasks(&self) -> &[Task] {
        self.tasks.list()
    }

    /// Looks up a task
    pub fn task(&self, id: &str) -> StoreResult<&Task> {
        self.tasks.get(id)
    }

    /// The task currently shown, if any
    pub fn active_task(&self) -> Option<&Task> {
        self.tasks.active()
    }

    /// Makes a task the active one
    pub fn select_task(&mut self, id: &str) -> StoreResult<&Task> {
        self.tasks.select(id)
    }

    /// Deletes a task together with its versions and case sets
    pub fn delete_task(&mut self, id: &str) -> StoreResult<Task> {
        let removed = self.tasks.delete(id)?;
        let versions = self.versions.remove_task(id);
        let case_sets = self.cases.remove_task(id);
        tracing::info!(task_id = id, versions, case_sets, "Deleted task");
        Ok(removed)
    }

    /// Appends a message to a task's transcript
    pub fn append_message(
        &mut self,
        task_id: &str,
        content: &str,
        sender: Sender,
    ) -> StoreResult<Message> {
        self.tasks.append_message(task_id, content, sender)
    }

    /// A task's transcript in display order
    pub fn messages(&self, task_id: &str) -> StoreResult<&[Message]> {
        self.tasks.messages(task_id)
    }

    /// A task's versions in append order
    pub fn versions(&self, task_id: &str) -> StoreResult<&[Version]> {
        self.tasks.get(task_id)?;
        Ok(self.versions.list(task_id))
    }

    /// A task's active version
    pub fn active_version(&self, task_id: &str) -> StoreResult<Option<&Version>> {
        self.tasks.get(task_id)?;
        Ok(self.versions.active(task_id))
    }

    /// Appends a version and makes it active
    ///
    /// The new version starts with a copy of the previously active
    /// version's test cases.
    pub fn add_version(&mut self, task_id: &str, name: &str, changes: &str) -> StoreResult<Version> {
        self.tasks.get(task_id)?;
        let carried = self.active_cases(task_id).to_vec();
        self.push_version(task_id, name, changes, carried)
    }

    /// Switches the active version without changing the version list
    pub fn select_version(&mut self, task_id: &str, version_id: &str) -> StoreResult<&Version> {
        self.tasks.get(task_id)?;
        self.versions.select(task_id, version_id)?;
        let count = self.cases.cases(task_id, version_id).len();
        self.tasks.set_case_count(task_id, count)?;
        tracing::debug!(task_id, version_id, "Selected version");
        self.versions
            .active(task_id)
            .ok_or_else(|| CasebenchError::not_found("version", version_id))
    }

    /// Test cases of the task's active version that pass `filter`
    pub fn test_cases(&self, task_id: &str, filter: &CaseFilter) -> StoreResult<Vec<TestCase>> {
        self.tasks.get(task_id)?;
        Ok(self
            .active_cases(task_id)
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }

    /// Test cases of a specific version that pass `filter`
    pub fn version_cases(
        &self,
        task_id: &str,
        version_id: &str,
        filter: &CaseFilter,
    ) -> StoreResult<Vec<TestCase>> {
        if !self.versions(task_id)?.iter().any(|v| v.id == version_id) {
            return Err(CasebenchError::not_found("version", version_id));
        }
        Ok(self
            .cases
            .cases(task_id, version_id)
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }

    /// Edits one test case of the task's active version
    ///
    /// An empty patch is a `Validation` error.
    pub fn update_test_case(
        &mut self,
        task_id: &str,
        case_id: &str,
        patch: &TestCasePatch,
    ) -> StoreResult<TestCase> {
        self.tasks.get(task_id)?;
        if patch.is_empty() {
            return Err(CasebenchError::Validation(format!(
                "update for test case {} changes nothing",
                case_id
            )));
        }
        let version_id = self
            .versions
            .active_id(task_id)
            .ok_or_else(|| CasebenchError::not_found("test case", case_id))?
            .to_string();
        let updated = self.cases.update(task_id, &version_id, case_id, patch)?;
        tracing::debug!(task_id, version_id, case_id, "Updated test case");
        Ok(updated)
    }

    /// Subscribe to task collection snapshots
    pub fn subscribe_tasks(&self) -> watch::Receiver<Arc<Vec<Task>>> {
        self.tasks.subscribe()
    }

    /// Progress of the current (or last) simulated run, if one was started
    pub fn subscribe_progress(&self) -> Option<watch::Receiver<u8>> {
        self.progress.subscribe()
    }

    /// Progress of every simulated run, across runs
    ///
    /// Unlike [`Workbench::subscribe_progress`] this receiver can be taken
    /// before a run starts and stays open for the workbench's lifetime.
    pub fn progress_feed(&self) -> watch::Receiver<u8> {
        self.progress_feed.subscribe()
    }

    /// Token that tears the workbench down when cancelled
    ///
    /// Any simulated run or chat reply delay in flight is cancelled and
    /// returns `CasebenchError::Cancelled` without touching state; later
    /// runs and chat messages fail the same way.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Generates a new task from PRD input
    ///
    /// Nothing is created until the progress run has completed.
    pub async fn generate(&mut self, input: GenerationInput) -> StoreResult<Task> {
        input.validate()?;
        tracing::info!(title = %input.title(), "Starting generation");
        self.run_progress("generation").await?;

        let date = Utc::now().format("%Y-%m-%d").to_string();
        let task = self.tasks.create(input.title(), date);
        self.tasks
            .append_message(&task.id, GENERATING_MESSAGE, Sender::Ai)?;

        let cases = self.generator.generate(&task.id, &input);
        self.push_version(&task.id, INITIAL_VERSION_NAME, INITIAL_VERSION_CHANGES, cases)?;
        self.tasks.select(&task.id)?;

        let task = self.tasks.get(&task.id)?.clone();
        tracing::info!(task_id = %task.id, cases = task.case_count, "Generation complete");
        Ok(task)
    }

    /// Sends a chat message and waits for the assistant
    ///
    /// Change requests add a new version once the simulated modification
    /// has completed.
    pub async fn send_chat(&mut self, task_id: &str, content: &str) -> StoreResult<ChatOutcome> {
        if self.shutdown.is_cancelled() {
            return Err(CasebenchError::Cancelled("reply".to_string()));
        }
        let request = self.tasks.append_message(task_id, content, Sender::User)?;

        if !self.reply_delay.is_zero() {
            tokio::select! {
                biased;

                _ = self.shutdown.cancelled() => {
                    tracing::info!(task_id, "Reply cancelled by shutdown");
                    return Err(CasebenchError::Cancelled("reply".to_string()));
                }
                _ = tokio::time::sleep(self.reply_delay) => {}
            }
        }

        let reply_text = self.assistant.reply(content);
        let reply = self.tasks.append_message(task_id, reply_text, Sender::Ai)?;

        let version = if self.assistant.requests_change(content) {
            self.run_progress("modification").await?;
            let revised = self
                .generator
                .revise(task_id, self.active_cases(task_id), content);
            let changes = self.change_note(content);
            Some(self.push_version(task_id, FEEDBACK_VERSION_NAME, &changes, revised)?)
        } else {
            None
        };

        Ok(ChatOutcome {
            request,
            reply,
            version,
        })
    }

    fn active_cases(&self, task_id: &str) -> &[TestCase] {
        match self.versions.active_id(task_id) {
            Some(version_id) => self.cases.cases(task_id, version_id),
            None => &[],
        }
    }

    fn push_version(
        &mut self,
        task_id: &str,
        name: &str,
        changes: &str,
        cases: Vec<TestCase>,
    ) -> StoreResult<Version> {
        let count = cases.len();
        let version = self.versions.add(task_id, name, changes);
        self.cases.replace(task_id, &version.id, cases);
        self.tasks.set_case_count(task_id, count)?;
        Ok(version)
    }

    fn change_note(&self, request: &str) -> String {
        let quoted: String = request.chars().take(self.change_summary_chars).collect();
        let ellipsis = if request.chars().count() > self.change_summary_chars {
            "..."
        } else {
            ""
        };
        format!("Modified test cases based on: \"{}{}\"", quoted, ellipsis)
    }

    async fn run_progress(&mut self, label: &str) -> StoreResult<()> {
        if self.shutdown.is_cancelled() {
            return Err(CasebenchError::Cancelled(label.to_string()));
        }

        let (done_tx, mut done_rx) = oneshot::channel();
        let mut updates = self.progress.start(move || {
            let _ = done_tx.send(());
        });
        self.progress_feed.send_replace(0);

        let shutdown = self.shutdown.clone();
        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    self.progress.cancel();
                    tracing::info!(label, "Simulated run cancelled by shutdown");
                    return Err(CasebenchError::Cancelled(label.to_string()));
                }

                done = &mut done_rx => {
                    self.progress_feed.send_replace(*updates.borrow());
                    return done.map_err(|_| CasebenchError::Cancelled(label.to_string()));
                }

                Ok(()) = updates.changed() => {
                    let value = *updates.borrow_and_update();
                    self.progress_feed.send_replace(value);
                }
            }
        }
    }
}

impl std::fmt::Debug for Workbench {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workbench")
            .field("tasks", &self.tasks.list().len())
            .field("active_task", &self.tasks.active_id())
            .field("progress", &self.progress)
            .finish()
    }
}
