//! `cases` and `export` command handlers
//!
//! Both resolve a [`CaseSelection`] to the filtered cases of the active (or
//! requested) version.

use crate::cli::CaseSelection;
use crate::config::Config;
use crate::error::Result;
use crate::export::{default_file_name, export_test_cases};
use crate::model::{Priority, TestCase};
use crate::workbench::Workbench;
use colored::Colorize;
use prettytable::{format, Table};
use std::path::PathBuf;

const TITLE_WIDTH: usize = 48;

/// Handle `casebench cases`
pub fn list_cases(workbench: &Workbench, selection: CaseSelection, json: bool) -> Result<()> {
    let cases = select_cases(workbench, &selection)?;

    if json {
        println!("{}", super::to_json(&cases)?);
        return Ok(());
    }

    if cases.is_empty() {
        println!("{}", "No test cases match.".yellow());
        return Ok(());
    }

    let task = workbench.task(&selection.task)?;
    println!("\nTest cases for {}:", task.title.bold());
    cases_table(&cases).printstd();
    println!("{} of {} shown", cases.len(), task.case_count);
    println!();
    Ok(())
}

/// Handle `casebench export`
///
/// Returns the path written.
pub fn export_cases(
    workbench: &Workbench,
    config: &Config,
    selection: CaseSelection,
    output: Option<PathBuf>,
) -> Result<PathBuf> {
    let cases = select_cases(workbench, &selection)?;
    let task = workbench.task(&selection.task)?;

    let path = output.unwrap_or_else(|| {
        let date = chrono::Local::now().format("%Y-%m-%d").to_string();
        PathBuf::from(default_file_name(
            &config.export.file_prefix,
            Some(&task.title),
            &date,
        ))
    });

    export_test_cases(&cases, &path)?;
    println!(
        "{}",
        format!("Exported {} test cases to {}", cases.len(), path.display()).green()
    );
    Ok(path)
}

/// Resolves a selection to the filtered cases of the chosen version
pub(crate) fn select_cases(
    workbench: &Workbench,
    selection: &CaseSelection,
) -> Result<Vec<TestCase>> {
    let filter = super::case_filter(selection.search.clone(), selection.priority.as_deref())?;
    let cases = match &selection.version {
        Some(version) => workbench.version_cases(&selection.task, version, &filter)?,
        None => workbench.test_cases(&selection.task, &filter)?,
    };
    Ok(cases)
}

pub(crate) fn cases_table(cases: &[TestCase]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "ID".bold(),
        "Title".bold(),
        "Scenario".bold(),
        "Steps".bold(),
        "Priority".bold()
    ]);

    for case in cases {
        let priority = match case.priority {
            Priority::High => case.priority.to_string().red(),
            Priority::Medium => case.priority.to_string().yellow(),
            Priority::Low => case.priority.to_string().normal(),
        };
        table.add_row(prettytable::row![
            case.id.cyan(),
            super::truncate(&case.title, TITLE_WIDTH),
            case.scenario,
            case.steps.len(),
            priority
        ]);
    }
    table
}
