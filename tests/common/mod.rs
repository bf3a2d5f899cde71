use casebench::{Config, Workbench};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Configuration with short simulated delays
#[allow(dead_code)]
pub fn fast_config() -> Config {
    let mut config = Config::default();
    config.progress.step = 20;
    config.progress.tick_interval_ms = 10;
    config.chat.reply_delay_ms = 5;
    config.auth.latency_ms = 0;
    config
}

#[allow(dead_code)]
pub fn seeded_workbench() -> Workbench {
    Workbench::seeded(&fast_config()).expect("failed to seed workbench")
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
