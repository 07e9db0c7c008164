//! Phone number normalization.
//!
//! Both providers expect bare international digits (`2348012345678`), while
//! users type local (`08012345678`), spaced or `+`-prefixed numbers.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{AppError, AppResult};

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-()]").expect("valid separator pattern"));

static TEN_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("valid ten digit pattern"));

static MSISDN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{7,15}$").expect("valid msisdn pattern"));

/// Default country calling code (Nigeria)
pub const DEFAULT_COUNTRY_CODE: &str = "234";

/// Normalize a phone number to `+<country code><number>` form.
///
/// Returns `None` for empty input. Numbers that match none of the local
/// patterns are returned with separators stripped but otherwise unchanged.
pub fn normalize_phone(raw: &str, country_code: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let phone = SEPARATORS.replace_all(trimmed, "");
    if phone.is_empty() {
        return None;
    }

    if phone.starts_with('+') {
        return Some(phone.into_owned());
    }
    if let Some(rest) = phone.strip_prefix('0') {
        return Some(format!("+{country_code}{rest}"));
    }
    if phone.starts_with(country_code) {
        return Some(format!("+{phone}"));
    }
    if TEN_DIGITS.is_match(&phone) {
        return Some(format!("+{country_code}{phone}"));
    }

    Some(phone.into_owned())
}

/// Normalize and drop the leading `+`, validating the result is all digits.
pub fn to_msisdn(raw: &str, country_code: &str) -> AppResult<String> {
    let normalized = normalize_phone(raw, country_code)
        .ok_or_else(|| AppError::validation("to", "Recipient phone number is empty"))?;
    let digits = normalized.trim_start_matches('+');

    if !MSISDN.is_match(digits) {
        return Err(AppError::validation(
            "to",
            format!("'{raw}' is not a valid phone number"),
        ));
    }

    Ok(digits.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_local_formats() {
        let cases = [
            ("08108394272", "+2348108394272"),
            ("0810 839 4272", "+2348108394272"),
            ("(0810)-839-4272", "+2348108394272"),
            ("2348108394272", "+2348108394272"),
            ("+2348108394272", "+2348108394272"),
            ("8108394272", "+2348108394272"),
            ("  +44 20 7946 0958 ", "+442079460958"),
        ];
        for (raw, expected) in cases {
            assert_eq!(
                normalize_phone(raw, DEFAULT_COUNTRY_CODE).as_deref(),
                Some(expected),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_phone("", DEFAULT_COUNTRY_CODE), None);
        assert_eq!(normalize_phone("   ", DEFAULT_COUNTRY_CODE), None);
        assert_eq!(normalize_phone(" - ", DEFAULT_COUNTRY_CODE), None);
    }

    #[test]
    fn test_unknown_format_passes_through() {
        assert_eq!(
            normalize_phone("12345", DEFAULT_COUNTRY_CODE).as_deref(),
            Some("12345")
        );
    }

    #[test]
    fn test_other_country_code() {
        assert_eq!(normalize_phone("0712345678", "254").as_deref(), Some("+254712345678"));
    }

    #[test]
    fn test_to_msisdn() {
        assert_eq!(to_msisdn("08108394272", DEFAULT_COUNTRY_CODE).unwrap(), "2348108394272");
        assert!(to_msisdn("", DEFAULT_COUNTRY_CODE).is_err());
        assert!(to_msisdn("not-a-number", DEFAULT_COUNTRY_CODE).is_err());
        assert!(to_msisdn("123", DEFAULT_COUNTRY_CODE).is_err());
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(digits in "[0-9]{10,13}") {
            let once = normalize_phone(&digits, DEFAULT_COUNTRY_CODE).unwrap();
            let twice = normalize_phone(&once, DEFAULT_COUNTRY_CODE).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_local_numbers_gain_country_code(rest in "[1-9][0-9]{9}") {
            let local = format!("0{rest}");
            let msisdn = to_msisdn(&local, DEFAULT_COUNTRY_CODE).unwrap();
            prop_assert_eq!(msisdn, format!("234{rest}"));
        }
    }
}
