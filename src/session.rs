//! Login gate in front of the dashboard.
//!
//! The password is compared in plaintext against the configured value. It
//! keeps casual passers-by out of the terminal and nothing more.

use crate::config::Config;
use crate::error::{precondition_error, DeskResult};
use chrono::{DateTime, Utc};
use rust_i18n::t;
use tracing::{info, warn};

/// Number of digits the gate expects
pub const PASSWORD_LENGTH: usize = 6;

/// Keep digits only, capped at `PASSWORD_LENGTH`
pub fn normalize_password_input(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(PASSWORD_LENGTH)
        .collect()
}

/// Proof that the gate was passed. Views take `&Session`; dropping it ends
/// the unlocked scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: String,
    unlocked_at: DateTime<Utc>,
}

impl Session {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn unlocked_at(&self) -> DateTime<Utc> {
        self.unlocked_at
    }
}

/// Checks the 6-digit password and hands out sessions
#[derive(Debug, Clone)]
pub struct LoginGate {
    password: String,
    user_id: String,
}

impl LoginGate {
    pub fn new(password: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            user_id: user_id.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.app_password.clone(), config.user_id.clone())
    }

    /// Normalize the input and compare it with the configured password
    pub fn unlock(&self, input: &str) -> DeskResult<Session> {
        let code = normalize_password_input(input);

        if code.len() != PASSWORD_LENGTH {
            return Err(precondition_error(&t!(
                "login_password_length",
                length = PASSWORD_LENGTH
            )));
        }

        if code != self.password {
            warn!("Rejected login attempt");
            return Err(precondition_error(&t!("login_password_incorrect")));
        }

        info!("Dashboard unlocked for {}", self.user_id);
        Ok(Session {
            user_id: self.user_id.clone(),
            unlocked_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_password_input() {
        assert_eq!(normalize_password_input("123456"), "123456");
        assert_eq!(normalize_password_input("12 34-56"), "123456");
        assert_eq!(normalize_password_input("1234567890"), "123456");
        assert_eq!(normalize_password_input("abc"), "");
        assert_eq!(normalize_password_input("１２３"), "");
    }

    #[test]
    fn test_unlock_with_matching_password() {
        let gate = LoginGate::new("123456", "default_user");
        let session = gate.unlock(" 123-456 ").unwrap();
        assert_eq!(session.user_id(), "default_user");
    }

    #[test]
    fn test_unlock_truncates_extra_digits() {
        let gate = LoginGate::new("123456", "default_user");
        assert!(gate.unlock("12345678").is_ok());
    }

    #[test]
    fn test_unlock_rejects_short_and_wrong_input() {
        let gate = LoginGate::new("123456", "default_user");

        let short = gate.unlock("12345").unwrap_err();
        assert!(short.is_precondition());

        let wrong = gate.unlock("654321").unwrap_err();
        assert!(wrong.is_precondition());
    }
}
