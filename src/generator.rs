//! Test case generation
//!
//! Generation input comes from the input panel (pasted PRD text, a PRD URL
//! or an uploaded file name). [`MockGenerator`] stands in for a model and
//! hands out fixture templates.

use crate::error::{CasebenchError, StoreResult};
use crate::fixtures;
use crate::model::TestCase;
use serde::{Deserialize, Serialize};

const TITLE_MAX_CHARS: usize = 40;

/// What the user submitted for generation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationInput {
    /// Pasted requirement text
    pub text: Option<String>,
    /// Link to a requirement document
    pub url: Option<String>,
    /// Name of an uploaded requirement file
    pub file_name: Option<String>,
}

impl GenerationInput {
    /// Input from pasted text
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Checks that at least one source is present
    ///
    /// # Errors
    ///
    /// Returns `Validation` when text, url and file name are all blank.
    pub fn validate(&self) -> StoreResult<()> {
        let has_content = [&self.text, &self.url, &self.file_name]
            .iter()
            .any(|field| field.as_deref().map_or(false, |s| !s.trim().is_empty()));
        if has_content {
            Ok(())
        } else {
            Err(CasebenchError::Validation(
                "generation needs PRD text, a URL or a file".to_string(),
            ))
        }
    }

    /// Title for the task created from this input
    ///
    /// Uses the first non-blank line of the text, else the url, else the
    /// file name, truncated to 40 characters.
    ///
    /// # Examples
    ///
    /// ```
    /// use casebench::generator::GenerationInput;
    ///
    /// let input = GenerationInput::from_text("\n  Checkout flow\nUsers pay by card");
    /// assert_eq!(input.title(), "Checkout flow");
    /// ```
    pub fn title(&self) -> String {
        let from_text = self
            .text
            .as_deref()
            .and_then(|t| t.lines().map(str::trim).find(|l| !l.is_empty()));
        let source = from_text
            .or_else(|| non_blank(&self.url))
            .or_else(|| non_blank(&self.file_name))
            .unwrap_or("Untitled generation");
        source.chars().take(TITLE_MAX_CHARS).collect()
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Produces and revises test case sets
pub trait CaseGenerator: Send + Sync {
    /// Cases for a freshly generated task
    fn generate(&self, task_id: &str, input: &GenerationInput) -> Vec<TestCase>;

    /// Cases for a new version after a change request
    fn revise(&self, task_id: &str, current: &[TestCase], request: &str) -> Vec<TestCase>;
}

/// Generator backed by fixture templates
#[derive(Debug, Clone, Default)]
pub struct MockGenerator;

impl CaseGenerator for MockGenerator {
    fn generate(&self, task_id: &str, input: &GenerationInput) -> Vec<TestCase> {
        tracing::debug!(task_id, title = %input.title(), "Generating mock test cases");
        fixtures::generation_templates()
            .into_iter()
            .enumerate()
            .map(|(i, mut case)| {
                case.id = format!("{}-tc{}", task_id, i + 1);
                case
            })
            .collect()
    }

    fn revise(&self, task_id: &str, current: &[TestCase], request: &str) -> Vec<TestCase> {
        tracing::debug!(task_id, request, "Revising mock test cases");
        current.to_vec()
    }
}
