//! Workbench data model
//!
//! Tasks own a chat transcript, versions mark snapshots of a task's test
//! case set, and test cases are attached to a (task, version) pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Typed by the user in the chat panel
    User,
    /// Produced by the (simulated) assistant
    Ai,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Ai => write!(f, "ai"),
        }
    }
}

/// One turn in a task's chat transcript
///
/// Messages are immutable once created; the id is a ULID so ids sort in
/// creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message id
    pub id: String,
    /// Message text
    pub content: String,
    /// Author of the message
    pub sender: Sender,
    /// When the message was created
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Creates a new message stamped with a fresh id and the current time
    ///
    /// # Examples
    ///
    /// ```
    /// use casebench::model::{Message, Sender};
    ///
    /// let msg = Message::new("Add a logout case", Sender::User);
    /// assert_eq!(msg.sender, Sender::User);
    /// assert_eq!(msg.id.len(), 26);
    /// ```
    pub fn new(content: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: Ulid::new().to_string(),
            content: content.into(),
            sender,
            timestamp: Utc::now(),
        }
    }
}

/// A named unit of generated test case work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task id
    pub id: String,
    /// Human readable title shown in the history list
    pub title: String,
    /// Creation date as `YYYY-MM-DD`
    pub date: String,
    /// Number of test cases in the task's active version
    pub case_count: usize,
    /// Chat transcript in display order
    pub messages: Vec<Message>,
}

impl Task {
    /// Creates an empty task with no messages
    pub fn new(id: impl Into<String>, title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            date: date.into(),
            case_count: 0,
            messages: Vec::new(),
        }
    }
}

/// A snapshot marker of a task's test case set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Version id of the form `{task_id}-v{n}`
    pub id: String,
    /// Short display name
    pub name: String,
    /// When the version was recorded
    pub timestamp: DateTime<Utc>,
    /// Description of what changed
    pub changes: String,
}

/// Test case priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Must pass before release
    High,
    /// Default priority
    Medium,
    /// Nice to have
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(format!("Unknown priority: {}", other)),
        }
    }
}

/// One generated test scenario record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    /// Case id, unique within a version
    pub id: String,
    /// Feature under test
    pub title: String,
    /// Conditions that must hold before the steps run
    pub preconditions: Vec<String>,
    /// Steps to execute, in order
    pub steps: Vec<String>,
    /// Observable outcomes, in order
    pub expected_results: Vec<String>,
    /// Functional area the case belongs to
    pub scenario: String,
    /// Case priority
    pub priority: Priority,
}

impl TestCase {
    /// Returns a copy of this case with every field set in `patch` replaced
    ///
    /// The id is never changed.
    pub fn apply(&self, patch: &TestCasePatch) -> Self {
        let mut updated = self.clone();
        if let Some(title) = &patch.title {
            updated.title = title.clone();
        }
        if let Some(preconditions) = &patch.preconditions {
            updated.preconditions = preconditions.clone();
        }
        if let Some(steps) = &patch.steps {
            updated.steps = steps.clone();
        }
        if let Some(expected_results) = &patch.expected_results {
            updated.expected_results = expected_results.clone();
        }
        if let Some(scenario) = &patch.scenario {
            updated.scenario = scenario.clone();
        }
        if let Some(priority) = patch.priority {
            updated.priority = priority;
        }
        updated
    }
}

/// Partial update for a [`TestCase`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCasePatch {
    /// New title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Replacement preconditions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preconditions: Option<Vec<String>>,
    /// Replacement steps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<String>>,
    /// Replacement expected results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_results: Option<Vec<String>>,
    /// New scenario
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    /// New priority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl TestCasePatch {
    /// True when the patch would not change anything
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Search and priority filter for the test case list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseFilter {
    /// Case-insensitive substring matched against the title
    pub search: Option<String>,
    /// Only keep cases of this priority
    pub priority: Option<Priority>,
}

impl CaseFilter {
    /// Returns true if `case` passes both the search and priority filters
    ///
    /// # Examples
    ///
    /// ```
    /// use casebench::model::{CaseFilter, Priority, TestCase};
    ///
    /// let case = TestCase {
    ///     id: "1-tc1".into(),
    ///     title: "Verify User Login".into(),
    ///     preconditions: vec![],
    ///     steps: vec![],
    ///     expected_results: vec![],
    ///     scenario: "Authentication".into(),
    ///     priority: Priority::High,
    /// };
    /// let filter = CaseFilter { search: Some("login".into()), priority: Some(Priority::High) };
    /// assert!(filter.matches(&case));
    /// ```
    pub fn matches(&self, case: &TestCase) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => case.title.to_lowercase().contains(&term.to_lowercase()),
        };
        let matches_priority = self.priority.map_or(true, |p| case.priority == p);
        matches_search && matches_priority
    }
}
