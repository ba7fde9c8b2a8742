//! Business-level input checks that run before any store access.

use crate::error::CoreError;
use crate::types::DbId;

/// Parse a loosely-typed identifier, naming the field in the error.
pub fn parse_id(raw: &str, field: &str) -> Result<DbId, CoreError> {
    raw.trim()
        .parse::<DbId>()
        .map_err(|e| CoreError::Validation(format!("Invalid {field} '{raw}': {e}")))
}

/// Reject empty or whitespace-only values.
pub fn require_non_blank(value: &str, field: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Quantities on order lines must be at least one.
pub fn require_positive_quantity(quantity: i32) -> Result<(), CoreError> {
    if quantity < 1 {
        return Err(CoreError::Validation(format!(
            "quantity must be at least 1, got {quantity}"
        )));
    }
    Ok(())
}
