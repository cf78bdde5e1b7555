//! Field validation helpers shared by every entity.

use crate::error::CoreError;

/// Trim `value` and reject it if nothing is left.
///
/// Returns the trimmed value so callers store what they validated.
pub fn require_non_empty(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Reject negative values for a non-negative integer field.
pub fn require_non_negative(field: &str, value: Option<i64>) -> Result<(), CoreError> {
    match value {
        Some(v) if v < 0 => Err(CoreError::Validation(format!(
            "{field} must not be negative, got {v}"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_accepts() {
        assert_eq!(require_non_empty("name", "  Rona ").unwrap(), "Rona");
    }

    #[test]
    fn rejects_blank() {
        let err = require_non_empty("role", " \t\n").unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref m) if m == "role is required"));
    }

    #[test]
    fn non_negative_allows_none_and_zero() {
        assert!(require_non_negative("age", None).is_ok());
        assert!(require_non_negative("age", Some(0)).is_ok());
        assert!(require_non_negative("age", Some(-1)).is_err());
    }
}
