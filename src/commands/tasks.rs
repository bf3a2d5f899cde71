//! `tasks` and `versions` command handlers

use crate::error::Result;
use crate::model::{Task, Version};
use crate::workbench::Workbench;
use colored::Colorize;
use prettytable::{format, Table};

const TITLE_WIDTH: usize = 40;

/// Handle `casebench tasks`
pub fn list_tasks(workbench: &Workbench, json: bool) -> Result<()> {
    let tasks = workbench.tasks();

    if json {
        println!("{}", super::to_json(tasks)?);
        return Ok(());
    }

    if tasks.is_empty() {
        println!("{}", "No tasks found.".yellow());
        return Ok(());
    }

    println!("\nTask History:");
    tasks_table(tasks, workbench).printstd();
    println!();
    println!(
        "Use {} to see a task's test cases.",
        "casebench cases --task <ID>".cyan()
    );
    println!();
    Ok(())
}

/// Handle `casebench versions`
pub fn list_versions(workbench: &Workbench, task_id: &str) -> Result<()> {
    let task = workbench.task(task_id)?;
    let versions = workbench.versions(task_id)?;
    let active = workbench.active_version(task_id)?.map(|v| v.id.clone());

    if versions.is_empty() {
        println!("{}", format!("Task {} has no versions.", task_id).yellow());
        return Ok(());
    }

    println!("\nVersions of {}:", task.title.bold());
    versions_table(versions, active.as_deref()).printstd();
    println!();
    Ok(())
}

pub(crate) fn tasks_table(tasks: &[Task], workbench: &Workbench) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "ID".bold(),
        "Title".bold(),
        "Date".bold(),
        "Cases".bold(),
        "Version".bold()
    ]);

    for task in tasks {
        let version = workbench
            .active_version(&task.id)
            .ok()
            .flatten()
            .map_or_else(|| "-".to_string(), |v| v.id.clone());
        table.add_row(prettytable::row![
            task.id.cyan(),
            super::truncate(&task.title, TITLE_WIDTH),
            task.date,
            task.case_count,
            version
        ]);
    }
    table
}

pub(crate) fn versions_table(versions: &[Version], active: Option<&str>) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "".bold(),
        "ID".bold(),
        "Name".bold(),
        "Recorded".bold(),
        "Changes".bold()
    ]);

    for version in versions {
        let marker = if Some(version.id.as_str()) == active {
            "*".green()
        } else {
            "".normal()
        };
        table.add_row(prettytable::row![
            marker,
            version.id.cyan(),
            version.name,
            version.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            version.changes
        ]);
    }
    table
}
