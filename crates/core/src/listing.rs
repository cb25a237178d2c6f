//! Food listing and claim input validation.
//!
//! Every check here runs before any database call. Failures carry a
//! field-level message suitable for showing next to the offending input.

use crate::error::CoreError;
use crate::types::{Date, DbId};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a food name (matches `VARCHAR(255)`).
pub const MAX_FOOD_NAME_LENGTH: usize = 255;

/// Maximum length of a listing location (matches `VARCHAR(255)`).
pub const MAX_LOCATION_LENGTH: usize = 255;

/// Maximum length of short vocabulary fields (food type, meal type, unit).
pub const MAX_LABEL_LENGTH: usize = 50;

/// Smallest quantity a listing may be created or updated with.
pub const MIN_LISTING_QUANTITY: f64 = 1.0;

/// Unit recorded when the caller does not supply one.
pub const DEFAULT_UNIT: &str = "kg";

/// Meal type recorded when the caller does not supply one.
pub const DEFAULT_MEAL_TYPE: &str = "Other";

/// Provider categories offered by the listing form.
pub const PROVIDER_TYPES: &[&str] = &[
    "Restaurant",
    "Grocery Store",
    "Supermarket",
    "Bakery",
    "Hotel",
    "Farm",
];

/// Food categories offered by the listing form.
pub const FOOD_TYPES: &[&str] = &[
    "Vegetarian",
    "Non-Vegetarian",
    "Vegan",
    "Dairy",
    "Gluten-Free",
    "Organic",
];

/// Meal categories offered by the listing form.
pub const MEAL_TYPES: &[&str] = &[
    "Breakfast",
    "Lunch",
    "Dinner",
    "Snacks",
    "Dessert",
    "Beverage",
];

// ---------------------------------------------------------------------------
// Field validators
// ---------------------------------------------------------------------------

/// Trim `value` and reject it if nothing is left or it exceeds `max_len`.
///
/// Returns the trimmed value, which is what gets stored.
pub fn require_text(field: &str, value: &str, max_len: usize) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    if trimmed.chars().count() > max_len {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field, mapping blank input to `None`.
pub fn optional_text(
    field: &str,
    value: Option<&str>,
    max_len: usize,
) -> Result<Option<String>, CoreError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => require_text(field, v, max_len).map(Some),
    }
}

/// A listing quantity must be a finite number of at least one unit.
pub fn validate_listing_quantity(quantity: f64) -> Result<(), CoreError> {
    if !quantity.is_finite() || quantity < MIN_LISTING_QUANTITY {
        return Err(CoreError::Validation(format!(
            "quantity must be at least {MIN_LISTING_QUANTITY}, got {quantity}"
        )));
    }
    Ok(())
}

/// A claimed quantity must be finite and strictly positive.
pub fn validate_claimed_quantity(quantity: f64) -> Result<(), CoreError> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(CoreError::Validation(format!(
            "claimed_quantity must be greater than 0, got {quantity}"
        )));
    }
    Ok(())
}

/// New listings may not already be expired.
pub fn validate_expiry(expiry: Date, today: Date) -> Result<(), CoreError> {
    if expiry < today {
        return Err(CoreError::Validation(format!(
            "expiry_date {expiry} is in the past (today is {today})"
        )));
    }
    Ok(())
}

/// Foreign-key style ids must be positive.
pub fn validate_reference_id(field: &str, id: DbId) -> Result<(), CoreError> {
    if id < 1 {
        return Err(CoreError::Validation(format!(
            "{field} must be a positive id, got {id}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // -- require_text --------------------------------------------------------

    #[test]
    fn require_text_trims_surrounding_whitespace() {
        assert_eq!(
            require_text("food_name", "  Fresh Apples \n", 255).unwrap(),
            "Fresh Apples"
        );
    }

    #[test]
    fn blank_text_is_rejected_with_field_name() {
        let err = require_text("location", "   ", 255).unwrap_err();
        assert_matches!(err, CoreError::Validation(ref msg) if msg == "location is required");
    }

    #[test]
    fn overlong_text_is_rejected() {
        let long = "x".repeat(MAX_FOOD_NAME_LENGTH + 1);
        assert!(require_text("food_name", &long, MAX_FOOD_NAME_LENGTH).is_err());
    }

    #[test]
    fn optional_text_maps_blank_to_none() {
        assert_eq!(optional_text("unit", Some("  "), 50).unwrap(), None);
        assert_eq!(optional_text("unit", None, 50).unwrap(), None);
        assert_eq!(
            optional_text("unit", Some(" pieces "), 50).unwrap().as_deref(),
            Some("pieces")
        );
    }

    // -- quantities ----------------------------------------------------------

    #[test]
    fn listing_quantity_must_be_at_least_one() {
        assert!(validate_listing_quantity(1.0).is_ok());
        assert!(validate_listing_quantity(50.5).is_ok());
        assert!(validate_listing_quantity(0.5).is_err());
        assert!(validate_listing_quantity(0.0).is_err());
        assert!(validate_listing_quantity(-3.0).is_err());
        assert!(validate_listing_quantity(f64::NAN).is_err());
    }

    #[test]
    fn claimed_quantity_must_be_positive() {
        assert!(validate_claimed_quantity(0.25).is_ok());
        assert!(validate_claimed_quantity(0.0).is_err());
        assert!(validate_claimed_quantity(f64::INFINITY).is_err());
    }

    // -- expiry --------------------------------------------------------------

    #[test]
    fn expiry_today_is_accepted() {
        let today = date(2026, 3, 14);
        assert!(validate_expiry(today, today).is_ok());
        assert!(validate_expiry(date(2026, 3, 15), today).is_ok());
    }

    #[test]
    fn expiry_in_the_past_is_rejected() {
        let err = validate_expiry(date(2026, 3, 13), date(2026, 3, 14)).unwrap_err();
        assert!(err.to_string().contains("expiry_date"));
    }

    // -- reference ids -------------------------------------------------------

    #[test]
    fn reference_ids_must_be_positive() {
        assert!(validate_reference_id("provider_id", 1).is_ok());
        assert!(validate_reference_id("provider_id", 0).is_err());
        assert!(validate_reference_id("receiver_id", -7).is_err());
    }
}
