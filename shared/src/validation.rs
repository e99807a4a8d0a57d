//! Input validation functions

use chrono::NaiveDate;

/// Maximum length the username column accepts
pub const MAX_USERNAME_LEN: usize = 128;

/// Maximum length the password column accepts
pub const MAX_PASSWORD_LEN: usize = 256;

/// Validate a username for registration
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username cannot be empty".to_string());
    }
    if username.len() > MAX_USERNAME_LEN {
        return Err("Username too long".to_string());
    }
    let username_regex = regex_lite::Regex::new(r"^[A-Za-z0-9_.-]+$").unwrap();
    if !username_regex.is_match(username) {
        return Err("Username may only contain letters, digits, '_', '.' and '-'".to_string());
    }
    Ok(())
}

/// Validate a password for registration
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password cannot be empty".to_string());
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` date path segment
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("Date {raw} is malformed! Correct format is YYYY-MM-DD."))
}
