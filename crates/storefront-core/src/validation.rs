//! # Validation Module
//!
//! Input validation for products entering the catalog.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Rendering surface                                            │
//! │  └── Required-field checks, immediate user feedback                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: ProductForm::parse (THIS MODULE)                             │
//! │  └── Text fields + price text → ProductDraft                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Session::add_product (validate_draft, THIS MODULE)           │
//! │  └── Re-checks every draft, even ones built directly in code           │
//! │                                                                         │
//! │  Defense in depth: a malformed product never reaches the catalog       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{parse_price, validate_quantity};
//!
//! assert_eq!(parse_price("59.99").unwrap().cents(), 5999);
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Product, ProductDraft};
use crate::{MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be blank
/// - At most [`MAX_NAME_LENGTH`] characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name, MAX_NAME_LENGTH)
}

/// Validates a product description.
///
/// ## Rules
/// - Must not be blank when entered through the catalog
/// - At most [`MAX_DESCRIPTION_LENGTH`] characters
pub fn validate_description(description: &str) -> ValidationResult<()> {
    validate_text("description", description, MAX_DESCRIPTION_LENGTH)
}

/// Validates an image reference.
///
/// Only presence is checked. The reference is opaque: it is never parsed as
/// a URL or fetched.
pub fn validate_image(image: &str) -> ValidationResult<()> {
    if image.trim().is_empty() {
        return Err(ValidationError::required("image"));
    }

    Ok(())
}

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Price Parsing
// =============================================================================

/// Parses a price typed as text into [`Money`].
///
/// ## Rules
/// - Plain decimal notation: `59`, `59.9`, `59.99`, `.5`, `+3`
/// - At most two fractional digits (the form steps in cents)
/// - Must be greater than zero after parsing
/// - Exponents, `NaN`, `inf` and thousands separators are rejected
///
/// ## Example
/// ```rust
/// use storefront_core::validation::parse_price;
///
/// assert_eq!(parse_price(" 129.99 ").unwrap().cents(), 12999);
/// assert!(parse_price("abc").is_err());
/// assert!(parse_price("0").is_err());
/// assert!(parse_price("-5").is_err());
/// ```
pub fn parse_price(input: &str) -> ValidationResult<Money> {
    const FIELD: &str = "price";

    let text = input.trim();
    if text.is_empty() {
        return Err(ValidationError::required(FIELD));
    }

    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let is_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return Err(ValidationError::invalid_format(
            FIELD,
            "must be a decimal number",
        ));
    }

    if fraction.len() > 2 {
        return Err(ValidationError::invalid_format(
            FIELD,
            "must have at most 2 decimal places",
        ));
    }

    let too_large = || ValidationError::invalid_format(FIELD, "is too large");

    let major: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| too_large())?
    };
    let minor: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().map_err(|_| too_large())? * 10,
        _ => fraction.parse().map_err(|_| too_large())?,
    };

    let cents = major
        .checked_mul(100)
        .and_then(|c| c.checked_add(minor))
        .ok_or_else(too_large)?;

    if negative || cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: FIELD.to_string(),
        });
    }

    Ok(Money::from_cents(cents))
}

/// Validates a price that is already a [`Money`] value.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Draft & Quantity Validators
// =============================================================================

/// Validates a whole draft before it enters the catalog.
pub fn validate_draft(draft: &ProductDraft) -> ValidationResult<()> {
    validate_product_name(&draft.name)?;
    validate_price(draft.price)?;
    validate_image(&draft.image)?;
    validate_description(&draft.description)?;
    Ok(())
}

/// Validates a catalog handed in from outside.
///
/// ## Rules
/// - Every product passes the same checks as a new draft
/// - Product ids are unique
pub fn validate_catalog(catalog: &[Product]) -> ValidationResult<()> {
    for (index, product) in catalog.iter().enumerate() {
        validate_product_name(&product.name)?;
        validate_price(product.price)?;
        validate_image(&product.image)?;
        validate_description(&product.description)?;

        if catalog[..index].iter().any(|p| p.id == product.id) {
            return Err(ValidationError::invalid_format("id", "duplicate product id"));
        }
    }
    Ok(())
}

/// Validates a requested cart quantity.
///
/// ## Rules
/// - Must be at least 1
///
/// The session treats a failure here as a silent rejection: the cart stays
/// as it was and no error reaches the user.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 1 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
