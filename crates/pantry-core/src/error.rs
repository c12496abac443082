//! # Error Types
//!
//! Domain-specific error types for pantry-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pantry-core errors (this file)                                        │
//! │  ├── CatalogError     - Lookup misses and rejected records             │
//! │  └── ValidationError  - Field rule failures                            │
//! │                                                                         │
//! │  pantry-shop errors (app)                                              │
//! │  └── ConfigError      - Configuration load/validation failures         │
//! │                                                                         │
//! │  Flow: ValidationError → CatalogError::MalformedRecord → log + skip    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Propagation Policy
//! - Catalog *queries* by id (`find_product`, `reviews`, `product_report`)
//!   return `Err(ProductNotFound)`.
//! - Catalog *commands* by id (`review_product`) log the miss and return `None`.
//! - The record parser never lets any of these escape a parse call.

use thiserror::Error;

use crate::product::ProductId;

// =============================================================================
// Catalog Error
// =============================================================================

/// Catalog and record-decoding errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// No product with this id is in the catalog.
    #[error("Product with id {0} not found")]
    ProductNotFound(ProductId),

    /// A record had the wrong shape or an unparsable token.
    ///
    /// ## When This Occurs
    /// - Non-numeric id, price or rating
    /// - Unparsable best-before date
    /// - Wrong number of fields for the record type
    /// - A field rule failed (empty name, negative price)
    #[error("Malformed record '{record}': {reason}")]
    MalformedRecord { record: String, reason: String },

    /// The leading type code of a product record is neither `D` nor `F`.
    #[error("Invalid product type '{code}' in record '{record}'")]
    InvalidProductType { record: String, code: String },
}

impl CatalogError {
    /// Builds a `MalformedRecord` for the given raw text.
    pub fn malformed(record: &str, reason: impl Into<String>) -> Self {
        CatalogError::MalformedRecord {
            record: record.to_string(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid number, invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CatalogError.
pub type CatalogResult<T> = Result<T, CatalogError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CatalogError::ProductNotFound(1010);
        assert_eq!(err.to_string(), "Product with id 1010 not found");

        let err = CatalogError::InvalidProductType {
            record: "X,1,Tea,1.00,2".to_string(),
            code: "X".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid product type 'X' in record 'X,1,Tea,1.00,2'"
        );
    }

    #[test]
    fn test_malformed_helper() {
        let err = CatalogError::malformed("1010,Two,comment", "rating is not a number");
        assert_eq!(
            err.to_string(),
            "Malformed record '1010,Two,comment': rating is not a number"
        );
    }
}
