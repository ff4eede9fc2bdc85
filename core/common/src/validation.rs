// core/common/src/validation.rs
// Query parameter validation

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Please provide a {field} (e.g., ?{field}={example})")]
    MissingField { field: String, example: String },
}

/// Require a query parameter to be present and non-empty.
///
/// `example` is echoed back in the error message as a usage hint.
pub fn require_param<'a>(
    field: &str,
    value: Option<&'a str>,
    example: &str,
) -> Result<&'a str, ValidationError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField {
            field: field.to_string(),
            example: example.to_string(),
        }),
    }
}

/// Best-effort numeric parse of an optional query parameter.
///
/// Uses the leading run of ASCII digits (`"15abc"` -> 15). Missing values, values
/// without leading digits and values overflowing `u32` yield `default`.
pub fn parse_numeric_or(value: Option<&str>, default: u32) -> u32 {
    let Some(raw) = value else {
        return default;
    };

    let trimmed = raw.trim_start();
    let digits_end = trimmed
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());

    trimmed[..digits_end].parse().unwrap_or(default)
}
