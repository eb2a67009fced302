//! Standalone validation rules: phone numbers, password policy and
//! upload extension allow-lists.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AppError, AppResult};

/// Uzbek mobile number: `+998` followed by exactly nine digits.
#[allow(clippy::expect_used)] // Pattern is a literal, checked by tests
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+998\d{9}$").expect("valid phone pattern"));

/// Allowed extensions for lesson video uploads.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "wmv"];

/// Allowed extensions for homework attachment uploads.
pub const HOMEWORK_FILE_EXTENSIONS: &[&str] = &["mp4", "wmv", "png", "jpg", "rar", "zip"];

/// Allowed extensions for student submission uploads.
pub const SUBMISSION_FILE_EXTENSIONS: &[&str] = &["rar", "zip", "png", "jpg", "mp4", "wmv"];

/// Validate a phone number against the `+998XXXXXXXXX` format.
pub fn validate_phone(number: &str) -> AppResult<()> {
    if PHONE_RE.is_match(number) {
        Ok(())
    } else {
        Err(AppError::Validation(
            "Phone number must match +998XXXXXXXXX".to_string(),
        ))
    }
}

/// Validate a password against the account password policy.
///
/// Checks run in a fixed order and the first failure is returned:
/// length, digit, uppercase, lowercase, special character.
pub fn validate_password(password: &str) -> AppResult<()> {
    if password.chars().count() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters long".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(
            "Password must contain at least one digit".to_string(),
        ));
    }
    if !password.chars().any(char::is_uppercase) {
        return Err(AppError::Validation(
            "Password must contain at least one uppercase letter".to_string(),
        ));
    }
    if !password.chars().any(char::is_lowercase) {
        return Err(AppError::Validation(
            "Password must contain at least one lowercase letter".to_string(),
        ));
    }
    if password.chars().all(char::is_alphanumeric) {
        return Err(AppError::Validation(
            "Password must contain at least one special character".to_string(),
        ));
    }
    Ok(())
}

/// Validate that a filename carries one of the allowed extensions.
///
/// Comparison is case-insensitive; a file without an extension is rejected.
pub fn validate_extension(filename: &str, allowed: &[&str]) -> AppResult<()> {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match ext {
        Some(ext) if allowed.contains(&ext.as_str()) => Ok(()),
        _ => Err(AppError::Validation(format!(
            "File extension must be one of: {}",
            allowed.join(", ")
        ))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn message(result: AppResult<()>) -> String {
        match result {
            Err(AppError::Validation(msg)) => msg,
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_phone() {
        assert!(validate_phone("+998901234567").is_ok());
    }

    #[test]
    fn test_invalid_phones() {
        // Wrong country code
        assert!(validate_phone("+997901234567").is_err());
        // Too short
        assert!(validate_phone("+99890123456").is_err());
        // Too long
        assert!(validate_phone("+9989012345678").is_err());
        // Missing plus
        assert!(validate_phone("998901234567").is_err());
        // Trailing garbage must not pass (anchored pattern)
        assert!(validate_phone("+998901234567x").is_err());
    }

    #[test]
    fn test_password_ok() {
        assert!(validate_password("Passw0rd!").is_ok());
    }

    #[test]
    fn test_password_checks_are_ordered() {
        // Too short: reported before any other failure
        assert!(message(validate_password("a1!")).contains("8 characters"));
        // Long enough but no digit
        assert!(message(validate_password("Abcdefg!")).contains("digit"));
        // No uppercase
        assert!(message(validate_password("abcdefg1!")).contains("uppercase"));
        // No lowercase
        assert!(message(validate_password("ABCDEFG1!")).contains("lowercase"));
        // No special character
        assert!(message(validate_password("Abcdefg1")).contains("special"));
    }

    #[test]
    fn test_video_extension_allow_list() {
        assert!(validate_extension("intro.mp4", VIDEO_EXTENSIONS).is_ok());
        assert!(validate_extension("intro.wmv", VIDEO_EXTENSIONS).is_ok());
        assert!(validate_extension("intro.avi", VIDEO_EXTENSIONS).is_err());
        assert!(validate_extension("intro.png", VIDEO_EXTENSIONS).is_err());
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert!(validate_extension("intro.MP4", VIDEO_EXTENSIONS).is_ok());
        assert!(validate_extension("archive.ZiP", SUBMISSION_FILE_EXTENSIONS).is_ok());
    }

    #[test]
    fn test_no_extension_rejected() {
        assert!(validate_extension("video", VIDEO_EXTENSIONS).is_err());
    }

    #[test]
    fn test_submission_extension_allow_list() {
        for ext in ["rar", "zip", "png", "jpg", "mp4", "wmv"] {
            assert!(validate_extension(&format!("work.{ext}"), SUBMISSION_FILE_EXTENSIONS).is_ok());
        }
        assert!(validate_extension("work.exe", SUBMISSION_FILE_EXTENSIONS).is_err());
    }
}
