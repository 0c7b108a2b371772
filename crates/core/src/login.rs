//! # Login
//!
//! Name/email form. Validates locally, then sends exactly one login request
//! per submit. The outcome is reported through the form's error field and,
//! on success, a fresh [`Session`] for the gate.

use std::sync::OnceLock;

use regex::Regex;

use crate::client::DogService;
use crate::errors::{ServiceError, ValidationError};
use crate::models::Credentials;
use crate::session::Session;

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,4}$";

pub const LOGIN_FAILED_PREFIX: &str = "Login failed: ";
pub const TRY_AGAIN_LATER: &str = "An error occurred. Please try again later.";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

/// Check a name/email pair before anything goes over the wire
pub fn validate(name: &str, email: &str) -> Result<Credentials, ValidationError> {
    if name.is_empty() || email.is_empty() {
        return Err(ValidationError::MissingField);
    }
    if !email_regex().is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(Credentials::new(name, email))
}

/// User-facing text for a failed login request
fn login_error_message(err: &ServiceError) -> String {
    match err {
        ServiceError::Rejected { body, .. } => format!("{}{}", LOGIN_FAILED_PREFIX, body),
        ServiceError::Transport(_) | ServiceError::Decode(_) => TRY_AGAIN_LATER.to_string(),
    }
}

/// Login form state
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub name: String,
    pub email: String,
    error: Option<String>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            error: None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validate and submit the form
    ///
    /// Returns the new session on success. Every failure leaves a message in
    /// [`LoginForm::error`]; validation failures send nothing.
    #[tracing::instrument(skip(self, service), fields(name = %self.name))]
    pub async fn submit(&mut self, service: &dyn DogService) -> Option<Session> {
        let credentials = match validate(&self.name, &self.email) {
            Ok(credentials) => credentials,
            Err(e) => {
                tracing::debug!(error = %e, "Login form rejected locally");
                self.error = Some(e.to_string());
                return None;
            }
        };

        self.error = None;

        match service.login(&credentials).await {
            Ok(()) => {
                tracing::info!("Login successful");
                Some(Session::authenticated(credentials.name, credentials.email))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Login failed");
                self.error = Some(login_error_message(&e));
                None
            }
        }
    }
}
