//! `generate`, `chat` and `login` command handlers

use crate::auth::{AuthSession, Authenticator, MockAuthenticator};
use crate::config::Config;
use crate::error::Result;
use crate::generator::GenerationInput;
use crate::model::{CaseFilter, Sender, Task};
use crate::progress::PROGRESS_COMPLETE;
use crate::workbench::{ChatOutcome, Workbench};
use colored::Colorize;
use std::io::Write;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Handle `casebench generate`
pub async fn generate(
    workbench: &mut Workbench,
    text: Option<String>,
    url: Option<String>,
    file: Option<String>,
) -> Result<Task> {
    let input = GenerationInput {
        text,
        url,
        file_name: file,
    };
    let progress = show_progress(workbench.progress_feed(), "Generating test cases");
    let result = workbench.generate(input).await;
    finish_progress(progress).await;
    let task = result?;

    println!(
        "{}",
        format!(
            "Created task {} \"{}\" with {} test cases",
            task.id, task.title, task.case_count
        )
        .green()
    );
    let cases = workbench.test_cases(&task.id, &CaseFilter::default())?;
    super::cases::cases_table(&cases).printstd();
    Ok(task)
}

/// Handle `casebench chat`
pub async fn chat(workbench: &mut Workbench, task_id: &str, message: &str) -> Result<ChatOutcome> {
    workbench.select_task(task_id)?;
    let progress = show_progress(workbench.progress_feed(), "Updating test cases");
    let result = workbench.send_chat(task_id, message).await;
    finish_progress(progress).await;
    let outcome = result?;

    for entry in [&outcome.request, &outcome.reply] {
        let who = match entry.sender {
            Sender::User => "you".bold(),
            Sender::Ai => "assistant".cyan().bold(),
        };
        println!("{} {}", format!("{}:", who), entry.content);
    }

    if let Some(version) = &outcome.version {
        println!();
        println!(
            "{}",
            format!("New version {} ({})", version.id, version.name).green()
        );
        println!("  {}", version.changes.dimmed());
    }
    Ok(outcome)
}

/// A progress line drawn by a background task
struct ProgressLine {
    stop: CancellationToken,
    handle: JoinHandle<Option<u8>>,
}

/// Redraws a single progress line whenever the feed changes
///
/// The watcher ends on its own once a run reaches 100, or when
/// [`finish_progress`] asks it to stop after drawing any pending value.
fn show_progress(mut feed: watch::Receiver<u8>, label: &'static str) -> ProgressLine {
    feed.borrow_and_update();
    let stop = CancellationToken::new();
    let stopped = stop.clone();

    let handle = tokio::spawn(async move {
        let mut drawn = None;
        loop {
            tokio::select! {
                biased;

                changed = feed.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let value = *feed.borrow_and_update();
                    print!("\r{} [{:>3}%]", label.cyan(), value);
                    let _ = std::io::stdout().flush();
                    drawn = Some(value);
                    if value >= PROGRESS_COMPLETE {
                        break;
                    }
                }

                _ = stopped.cancelled() => break,
            }
        }
        drawn
    });

    ProgressLine { stop, handle }
}

/// Stops the watcher and ends its line; returns the last value drawn
async fn finish_progress(line: ProgressLine) -> Option<u8> {
    line.stop.cancel();
    let drawn = line.handle.await.ok().flatten();
    if drawn.is_some() {
        println!();
    }
    drawn
}

/// Handle `casebench login`
pub async fn login(config: &Config, email: &str, password: &str) -> Result<AuthSession> {
    let authenticator = MockAuthenticator::new(&config.auth);
    let session = authenticator.login(email, password).await?;
    println!(
        "{}",
        format!("Welcome, {}! Signed in as {}", session.display_name, session.email).green()
    );
    Ok(session)
}
