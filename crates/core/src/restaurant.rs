//! Restaurant field rules: allowed categories, name bounds and the
//! `validator` custom functions used by command DTOs.

use std::borrow::Cow;

use validator::ValidationError;

/// Minimum restaurant name length (characters).
pub const NAME_MIN_LEN: u64 = 3;

/// Maximum restaurant name length (characters).
pub const NAME_MAX_LEN: u64 = 100;

/// Entity label used in not-found errors.
pub const RESTAURANT_ENTITY: &str = "Restaurant";

/// Categories a restaurant may be filed under, in canonical spelling.
pub const CATEGORIES: &[&str] = &[
    "American", "Chinese", "French", "Indian", "Italian", "Japanese", "Mexican", "Thai",
];

/// Resolve a user-supplied category to its canonical spelling.
///
/// Matching ignores case and surrounding whitespace.
pub fn canonical_category(input: &str) -> Option<&'static str> {
    let wanted = input.trim();
    CATEGORIES
        .iter()
        .copied()
        .find(|c| c.eq_ignore_ascii_case(wanted))
}

/// Postal codes use the `NN-NNN` layout.
pub fn is_valid_postal_code(code: &str) -> bool {
    let bytes = code.as_bytes();
    bytes.len() == 6
        && bytes[2] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || b.is_ascii_digit())
}

fn invalid(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Owned(message));
    err
}

/// `#[validate(custom(function = "validate_category"))]`
pub fn validate_category(value: &str) -> Result<(), ValidationError> {
    if canonical_category(value).is_some() {
        Ok(())
    } else {
        Err(invalid(
            "category",
            format!("category must be one of [{}]", CATEGORIES.join(", ")),
        ))
    }
}

/// `#[validate(custom(function = "validate_postal_code"))]`
pub fn validate_postal_code(value: &str) -> Result<(), ValidationError> {
    if is_valid_postal_code(value) {
        Ok(())
    } else {
        Err(invalid(
            "postal_code",
            "postalCode must match the NN-NNN format".to_string(),
        ))
    }
}
