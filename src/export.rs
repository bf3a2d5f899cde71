//! Spreadsheet export of test cases
//!
//! Cases are laid out with a fixed column order and written as CSV. List
//! fields (preconditions, steps, expected results) share a single cell with
//! one entry per line, and the "Actual Results" column is always left empty
//! for the tester to fill in.

use crate::error::{CasebenchError, StoreResult};
use crate::model::TestCase;
use prettytable::{Cell, Row, Table};
use std::fs::File;
use std::path::Path;

/// Column headers in export order
pub const EXPORT_HEADERS: [&str; 8] = [
    "ID",
    "Title",
    "Scenario",
    "Preconditions",
    "Steps",
    "Expected Results",
    "Actual Results",
    "Priority",
];

/// One export row, in [`EXPORT_HEADERS`] order
pub fn export_row(case: &TestCase) -> [String; 8] {
    [
        case.id.clone(),
        case.title.clone(),
        case.scenario.clone(),
        case.preconditions.join("\n"),
        case.steps.join("\n"),
        case.expected_results.join("\n"),
        String::new(),
        case.priority.to_string(),
    ]
}

/// Builds the export table, header row first
pub fn export_table(cases: &[TestCase]) -> Table {
    let mut table = Table::new();
    table.add_row(Row::new(EXPORT_HEADERS.iter().map(|h| Cell::new(h)).collect()));
    for case in cases {
        table.add_row(Row::new(
            export_row(case).iter().map(|v| Cell::new(v)).collect(),
        ));
    }
    table
}

/// Writes `cases` as CSV to `path`
///
/// # Errors
///
/// Returns `Validation` when there is nothing to export and `Export` or
/// `Io` when the file cannot be written.
pub fn export_test_cases(cases: &[TestCase], path: &Path) -> StoreResult<()> {
    if cases.is_empty() {
        return Err(CasebenchError::Validation(
            "there are no test cases to export".to_string(),
        ));
    }

    let file = File::create(path)?;
    export_table(cases)
        .to_csv(file)
        .map_err(|e| CasebenchError::Export(e.to_string()))?;

    tracing::info!(path = %path.display(), count = cases.len(), "Exported test cases");
    Ok(())
}

/// Default export file name: `{prefix}-{title or "all"}-{date}.csv`
///
/// # Examples
///
/// ```
/// use casebench::export::default_file_name;
///
/// let name = default_file_name("test-cases", Some("Payment Processing Module"), "2024-05-01");
/// assert_eq!(name, "test-cases-Payment Processing Module-2024-05-01.csv");
/// assert_eq!(default_file_name("test-cases", None, "2024-05-01"), "test-cases-all-2024-05-01.csv");
/// ```
pub fn default_file_name(prefix: &str, task_title: Option<&str>, date: &str) -> String {
    let title: String = task_title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or("all")
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect();
    format!("{}-{}-{}.csv", prefix, title, date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;
    use tempfile::TempDir;

    fn sample() -> TestCase {
        TestCase {
            id: "2-tc1".to_string(),
            title: "Verify Credit Card Payment".to_string(),
            preconditions: vec![
                "User is logged in".to_string(),
                "User has items in cart".to_string(),
            ],
            steps: vec![
                "Navigate to checkout page".to_string(),
                "Submit payment".to_string(),
            ],
            expected_results: vec!["Payment should be processed successfully".to_string()],
            scenario: "Payment".to_string(),
            priority: Priority::High,
        }
    }

    #[test]
    fn test_export_row_column_order() {
        let row = export_row(&sample());
        assert_eq!(row[0], "2-tc1");
        assert_eq!(row[1], "Verify Credit Card Payment");
        assert_eq!(row[2], "Payment");
        assert_eq!(row[3], "User is logged in\nUser has items in cart");
        assert_eq!(row[4], "Navigate to checkout page\nSubmit payment");
        assert_eq!(row[5], "Payment should be processed successfully");
        assert_eq!(row[6], "");
        assert_eq!(row[7], "high");
    }

    #[test]
    fn test_export_writes_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cases.csv");
        export_test_cases(&[sample()], &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let header = contents.lines().next().unwrap();
        assert_eq!(
            header,
            "ID,Title,Scenario,Preconditions,Steps,Expected Results,Actual Results,Priority"
        );
        assert!(contents.contains("\"User is logged in\nUser has items in cart\""));
        assert!(contents.contains("2-tc1,Verify Credit Card Payment,Payment,"));
    }

    #[test]
    fn test_export_empty_list_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cases.csv");
        let err = export_test_cases(&[], &path).unwrap_err();
        assert!(err.is_validation());
        assert!(!path.exists());
    }

    #[test]
    fn test_default_file_name_sanitizes_title() {
        let name = default_file_name("qa", Some("Login/Logout: v2"), "2024-01-02");
        assert_eq!(name, "qa-Login_Logout_ v2-2024-01-02.csv");
    }
}
