//! CLI argument validation functions
//!
//! This module provides custom validation functions for CLI arguments
//! that go beyond what clap can validate automatically.

use std::fs;
use std::path::PathBuf;

/// Shortest and longest digit counts accepted for a phone number
const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;

/// Validate that a file path is accessible (exists and is readable)
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!("Cannot read configuration file '{}': {}", path_str, e)),
    }
}

/// Validate a recipient phone number (basic validation)
///
/// Accepts digits with an optional leading `+` and the usual separators
/// (spaces, `-`, parentheses). Country-code normalization happens later.
pub fn validate_phone_number(phone_str: &str) -> Result<String, String> {
    let phone = phone_str.trim();

    if phone.is_empty() {
        return Err("Phone number cannot be empty".to_string());
    }

    let body = phone.strip_prefix('+').unwrap_or(phone);
    if let Some(bad) = body
        .chars()
        .find(|c| !(c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')')))
    {
        return Err(format!(
            "Invalid character '{}' in phone number '{}'",
            bad, phone_str
        ));
    }

    let digits = body.chars().filter(char::is_ascii_digit).count();
    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        return Err(format!(
            "Phone number must have between {} and {} digits, got {}",
            MIN_PHONE_DIGITS, MAX_PHONE_DIGITS, digits
        ));
    }

    Ok(phone.to_string())
}

/// Validate message text is not blank
///
/// Surrounding whitespace is kept; providers receive the text as typed.
pub fn validate_message_text(text: &str) -> Result<String, String> {
    if text.trim().is_empty() {
        return Err("Message text cannot be empty".to_string());
    }
    Ok(text.to_string())
}

/// Validate a pin or pin id (non-empty, no whitespace)
pub fn validate_pin_value(value: &str) -> Result<String, String> {
    let value = value.trim();

    if value.is_empty() {
        return Err("Value cannot be empty".to_string());
    }

    if value.chars().any(char::is_whitespace) {
        return Err(format!("Value cannot contain spaces: '{}'", value));
    }

    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_phone_validation_valid_numbers() {
        let valid = [
            "08108394272",
            "+2348108394272",
            "2348108394272",
            "0810 839 4272",
            "(0810) 839-4272",
            "8108394272",
        ];

        for phone in valid {
            assert!(validate_phone_number(phone).is_ok(), "{} should be valid", phone);
        }
    }

    #[test]
    fn test_phone_validation_invalid_numbers() {
        let invalid = ["", "   ", "phone", "0810839427x", "12345", "+1234567890123456", "++234810"];

        for phone in invalid {
            assert!(validate_phone_number(phone).is_err(), "'{}' should be invalid", phone);
        }
    }

    #[test]
    fn test_phone_validation_trims() {
        assert_eq!(validate_phone_number(" 08108394272 ").unwrap(), "08108394272");
    }

    #[test]
    fn test_message_text_validation() {
        assert_eq!(validate_message_text("Hi there ").unwrap(), "Hi there ");
        assert!(validate_message_text("  ").is_err());
    }

    #[test]
    fn test_pin_validation() {
        assert_eq!(validate_pin_value(" 195558 ").unwrap(), "195558");
        assert!(validate_pin_value("").is_err());
        assert!(validate_pin_value("19 5558").is_err());
    }

    #[test]
    fn test_config_file_path_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[termii]").unwrap();
        let path = file.path().to_str().unwrap();
        assert_eq!(validate_config_file_path(path).unwrap(), file.path());

        let dir = tempfile::TempDir::new().unwrap();
        assert!(validate_config_file_path(dir.path().to_str().unwrap()).is_err());
        assert!(validate_config_file_path("/nonexistent/sms-dispatch.toml").is_err());
    }
}
