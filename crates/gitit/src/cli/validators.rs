//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

use crate::storage;

/// Validate a ticket id or id prefix.
///
/// Ids name files, so only ASCII letters and digits are accepted.
pub fn validate_ticket_id(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Ticket ID cannot be empty".to_string());
    }

    if !s.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(format!(
            "Invalid ticket ID: '{s}'. Ticket IDs contain only letters and digits"
        ));
    }

    Ok(s.to_string())
}

/// Validate a release name.
///
/// Delegates to [`storage::validate_release`] so the CLI and the store
/// accept the same names.
pub fn validate_release(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    storage::validate_release(trimmed).map_err(|e| e.to_string())?;
    Ok(trimmed.to_string())
}
