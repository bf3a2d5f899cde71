//! Casebench - AI-assisted test case workbench CLI
//!
#![doc = "Casebench - AI-assisted test case workbench CLI"]
#![doc = "Main entry point for the Casebench application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use casebench::cli::{Cli, Commands};
use casebench::commands;
use casebench::config::Config;
use casebench::workbench::Workbench;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    let mut workbench = Workbench::seeded(&config)?;

    let shutdown = workbench.shutdown_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, cancelling pending work");
            shutdown.cancel();
        }
    });

    match cli.command {
        Commands::Tasks { json } => commands::tasks::list_tasks(&workbench, json)?,
        Commands::Versions { task } => commands::tasks::list_versions(&workbench, &task)?,
        Commands::Cases { selection, json } => {
            commands::cases::list_cases(&workbench, selection, json)?
        }
        Commands::Export { selection, output } => {
            tracing::info!(task_id = %selection.task, "Starting export");
            commands::cases::export_cases(&workbench, &config, selection, output)?;
        }
        Commands::Generate { text, url, file } => {
            tracing::info!("Starting generation");
            commands::session::generate(&mut workbench, text, url, file).await?;
        }
        Commands::Chat { task, message } => {
            tracing::debug!(task_id = %task, "Sending chat message");
            commands::session::chat(&mut workbench, &task, &message).await?;
        }
        Commands::Login { email, password } => {
            commands::session::login(&config, &email, &password).await?;
        }
    }

    Ok(())
}

/// Initialize tracing subscriber with environment filter
///
/// `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "casebench=debug"
    } else {
        "casebench=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
