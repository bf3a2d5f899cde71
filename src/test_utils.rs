//! Test utilities for Casebench
//!
//! This module provides fast configurations, seeded workbenches, and
//! assertion helpers shared by unit tests.

use crate::config::Config;
use crate::error::CasebenchError;
use crate::workbench::Workbench;
use tempfile::TempDir;

/// Create a temporary directory for testing
///
/// Returns a TempDir that will be cleaned up when dropped
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Assert that an error contains the expected message
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T>(result: Result<T, CasebenchError>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

/// Configuration with short simulated delays
///
/// A progress run takes four 10ms ticks and chat replies wait 5ms.
pub fn fast_config() -> Config {
    let mut config = Config::default();
    config.progress.step = 25;
    config.progress.tick_interval_ms = 10;
    config.chat.reply_delay_ms = 5;
    config.auth.latency_ms = 0;
    config
}

/// Workbench seeded with the fixture history and [`fast_config`]
pub fn seeded_workbench() -> Workbench {
    Workbench::seeded(&fast_config()).expect("Failed to seed workbench")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_assert_error_contains_success() {
        let result: Result<(), CasebenchError> = Err(CasebenchError::not_found("task", "7"));
        assert_error_contains(result, "task not found");
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_ok() {
        let result: Result<(), CasebenchError> = Ok(());
        assert_error_contains(result, "error");
    }

    #[test]
    #[should_panic(expected = "does not contain")]
    fn test_assert_error_contains_wrong_message() {
        let result: Result<(), CasebenchError> =
            Err(CasebenchError::Config("different error".to_string()));
        assert_error_contains(result, "not present");
    }

    #[test]
    fn test_fast_config_is_valid() {
        assert!(fast_config().validate().is_ok());
    }
}
