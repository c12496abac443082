//! # Validation Module
//!
//! Field rules applied to decoded records before they reach the catalog.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Record Validation Layers                           │
//! │                                                                         │
//! │  Layer 1: Shape                                                        │
//! │  └── field count per record type (parser)                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Tokens (THIS MODULE)                                         │
//! │  ├── numeric id / stars                                                │
//! │  ├── decimal price, not negative                                       │
//! │  └── non-empty, bounded name                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog                                                      │
//! │  └── id must exist for reviews                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Direct API calls on the catalog are trusted; only text input is checked.

use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest product name accepted from a record.
pub const MAX_NAME_LENGTH: usize = 200;

/// Highest price accepted from a record ($10,000,000.00).
pub const MAX_PRICE: Money = Money::from_cents(1_000_000_000);

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_NAME_LENGTH`] characters
///
/// ## Example
/// ```rust
/// use pantry_core::validation::validate_product_name;
///
/// assert_eq!(validate_product_name("  Tea ").unwrap(), "Tea");
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<&str> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(name)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses an integer token such as an id or star count.
pub fn parse_integer<T: FromStr>(field: &str, token: &str) -> ValidationResult<T> {
    token
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("'{}' is not a whole number", token.trim()),
        })
}

/// Parses a decimal price token.
///
/// ## Rules
/// - Plain decimal (see [`Money`]'s `FromStr`)
/// - Must be non-negative; zero is allowed (free items)
/// - At most [`MAX_PRICE`]
pub fn parse_price(token: &str) -> ValidationResult<Money> {
    let price: Money = token.parse()?;

    if price.is_negative() || price > MAX_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE.cents(),
        });
    }

    Ok(price)
}

// =============================================================================
// Unit Tests
// =============================================================================
