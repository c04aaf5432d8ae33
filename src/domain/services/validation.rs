#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;

use crate::domain::models::ClientError;

pub const MIN_PASSWORD_LENGTH: usize = 6;

pub fn validate_signup(user_name: &str, email: &str, password: &str) -> Result<(), ClientError> {
    if user_name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(ClientError::validation("Please fill in all fields"));
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ClientError::validation(
            "Password must be at least 6 characters long",
        ));
    }

    return Ok(());
}

pub fn validate_login(email: &str, password: &str) -> Result<(), ClientError> {
    if email.is_empty() || password.is_empty() {
        return Err(ClientError::validation("Please fill in all fields"));
    }

    return Ok(());
}
