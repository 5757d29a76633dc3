//! Field validation for product drafts and patches.
//!
//! Validation runs before a mutation touches the override set, so a rejected
//! draft leaves the persisted state unchanged.

use crate::{error::Result, Error};

/// A required text field must contain something other than whitespace.
pub fn required_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::MissingRequiredField(field.to_string()));
    }
    Ok(())
}

/// Prices are finite and never negative.
pub fn price(value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(invalid("price", "must be a finite number"));
    }
    if value < 0.0 {
        return Err(invalid("price", "must not be negative"));
    }
    Ok(())
}

/// Image URLs may be any string, but not blank.
pub fn images(urls: &[String]) -> Result<()> {
    match urls.iter().position(|url| url.trim().is_empty()) {
        Some(index) => Err(invalid("images", &format!("entry {index} is blank"))),
        None => Ok(()),
    }
}

fn invalid(field: &str, reason: &str) -> Error {
    Error::InvalidField {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
