//! Mock authentication
//!
//! The workbench treats the signed-in user as an opaque session value.
//! [`MockAuthenticator`] accepts any well-formed email with a long enough
//! password after a simulated round trip.

use crate::config::AuthConfig;
use crate::error::{CasebenchError, StoreResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::Duration;

/// The signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Address the user signed in with, trimmed
    pub email: String,
    /// Local part of the email, used for greetings and avatar initials
    pub display_name: String,
    /// When the login succeeded
    pub signed_in_at: DateTime<Utc>,
}

/// Login and logout against some identity backend
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Signs in and returns the new session
    ///
    /// # Errors
    ///
    /// Returns `Validation` for malformed input and `Authentication` when
    /// the credentials are rejected.
    async fn login(&self, email: &str, password: &str) -> StoreResult<AuthSession>;

    /// Ends the current session, if any
    async fn logout(&self);

    /// The current session, if signed in
    fn current(&self) -> Option<AuthSession>;
}

/// Authenticator that never leaves the process
#[derive(Debug)]
pub struct MockAuthenticator {
    latency: Duration,
    min_password_len: usize,
    session: Mutex<Option<AuthSession>>,
}

impl MockAuthenticator {
    /// Creates an authenticator from configuration
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            latency: Duration::from_millis(config.latency_ms),
            min_password_len: config.min_password_len,
            session: Mutex::new(None),
        }
    }

    fn set_session(&self, session: Option<AuthSession>) {
        match self.session.lock() {
            Ok(mut guard) => *guard = session,
            Err(poisoned) => *poisoned.into_inner() = session,
        }
    }
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    async fn login(&self, email: &str, password: &str) -> StoreResult<AuthSession> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(CasebenchError::Validation(
                "email and password are required".to_string(),
            ));
        }
        let Some((local, domain)) = email.split_once('@') else {
            return Err(CasebenchError::Validation(format!(
                "invalid email address: {}",
                email
            )));
        };
        if local.is_empty() || domain.is_empty() {
            return Err(CasebenchError::Validation(format!(
                "invalid email address: {}",
                email
            )));
        }

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if password.chars().count() < self.min_password_len {
            tracing::warn!(email, "Login rejected");
            return Err(CasebenchError::Authentication(
                "invalid email or password".to_string(),
            ));
        }

        let session = AuthSession {
            email: email.to_string(),
            display_name: local.to_string(),
            signed_in_at: Utc::now(),
        };
        self.set_session(Some(session.clone()));
        tracing::info!(email, "Signed in");
        Ok(session)
    }

    async fn logout(&self) {
        self.set_session(None);
        tracing::info!("Signed out");
    }

    fn current(&self) -> Option<AuthSession> {
        match self.session.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
