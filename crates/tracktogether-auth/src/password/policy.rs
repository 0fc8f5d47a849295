//! Registration input checks.

use tracktogether_core::config::AuthConfig;
use tracktogether_core::error::AppError;

/// Validates registration email and password.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    min_length: usize,
}

impl PasswordPolicy {
    /// Creates a policy from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Checks the email shape.
    pub fn validate_email(&self, email: &str) -> Result<(), AppError> {
        let email = email.trim();
        let Some((local, domain)) = email.split_once('@') else {
            return Err(AppError::validation("Email address is invalid"));
        };
        if local.is_empty() || domain.is_empty() || email.contains(char::is_whitespace) {
            return Err(AppError::validation("Email address is invalid"));
        }
        Ok(())
    }

    /// Checks the password length.
    pub fn validate_password(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }
        Ok(())
    }
}
