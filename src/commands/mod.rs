/*!
Command handlers for the CLI

Each handler receives the seeded [`Workbench`](crate::workbench::Workbench)
built by the entrypoint and prints its result to stdout:

- `tasks`: task history and version listings
- `cases`: test case listing and CSV export
- `session`: generation, chat and login

Rendering is split from printing so the tables can be checked in tests.
*/

pub mod cases;
pub mod session;
pub mod tasks;

use crate::error::{CasebenchError, Result, StoreResult};
use crate::model::{CaseFilter, Priority};
use serde::Serialize;

/// Builds a case filter from the raw CLI flags
///
/// # Errors
///
/// Returns a validation error if `priority` is not high, medium or low.
pub fn case_filter(search: Option<String>, priority: Option<&str>) -> Result<CaseFilter> {
    let priority = priority
        .map(|p| p.parse::<Priority>().map_err(CasebenchError::Validation))
        .transpose()?;
    Ok(CaseFilter { search, priority })
}

/// Pretty JSON for `--json` output
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> StoreResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Shortens `text` to `max` characters, marking the cut with "..."
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_filter_parses_priority() {
        let filter = case_filter(Some("login".to_string()), Some("HIGH")).unwrap();
        assert_eq!(filter.priority, Some(Priority::High));
        assert_eq!(filter.search.as_deref(), Some("login"));
    }

    #[test]
    fn test_case_filter_rejects_unknown_priority() {
        let err = case_filter(None, Some("urgent")).unwrap_err();
        let err = err.downcast::<CasebenchError>().unwrap();
        assert!(err.is_validation());
    }

    #[test]
    fn test_to_json_lists_tasks() {
        let wb = crate::test_utils::seeded_workbench();
        let json = to_json(wb.tasks()).unwrap();
        let parsed: Vec<crate::model::Task> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 4);
        assert!(json.contains("\"caseCount\""));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Payment Processing Module", 10), "Payment...");
    }
}
