//! Password policy for newly provisioned accounts.

use pharmacy_core::config::AuthConfig;
use pharmacy_core::error::AppError;

/// Validates password strength against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Returns the first policy violation, if any.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        let checks: [(fn(char) -> bool, &str); 4] = [
            (char::is_uppercase, "an uppercase letter"),
            (char::is_lowercase, "a lowercase letter"),
            (|c| c.is_ascii_digit(), "a digit"),
            (|c| !c.is_alphanumeric(), "a special character"),
        ];
        for (check, what) in checks {
            if !password.chars().any(check) {
                return Err(AppError::validation(format!(
                    "Password must contain at least {what}"
                )));
            }
        }

        let estimate = zxcvbn::zxcvbn(password, &[]);
        if estimate.score() < zxcvbn::Score::Three {
            return Err(AppError::validation(
                "Password is too weak. Please use a longer or less predictable password.",
            ));
        }

        Ok(())
    }
}
