//! # pantry-core: Pure Catalog Logic for Pantry
//!
//! This crate is the **heart** of Pantry. It owns the product/review engine
//! as plain in-memory values with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pantry Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    pantry-shop (demo driver)                    │   │
//! │  │      config ──► logging ──► scenario ──► stdout                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pantry-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  product  │  │  catalog  │  │  parser   │  │  format   │  │   │
//! │  │   │  Food     │  │  Catalog  │  │  Record   │  │  Resource │  │   │
//! │  │   │  Drink    │  │  Entry    │  │  Parser   │  │  Formatter│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                 │   │
//! │  │   │  rating   │  │  review   │  │   money   │                 │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO CONSOLE • PLAIN VALUES                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`rating`] - The 0..5 star scale and the `Rateable` capability
//! - [`review`] - Reviews and their display ordering
//! - [`product`] - Food and Drink variants with discount rules
//! - [`catalog`] - The product/review store
//! - [`parser`] - Delimited record decoding
//! - [`format`] - Locale-specific rendering
//! - [`validation`] - Field rules for parsed records
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use pantry_core::{Catalog, Money, Rating};
//!
//! let mut catalog = Catalog::for_locale("en-US");
//! catalog.create_drink(101, "Tea", Money::from_cents(1199), Rating::NotRated);
//!
//! catalog.review_product(101, Rating::FourStar, "Nice");
//! let tea = catalog.review_product(101, Rating::OneStar, "Bitter").unwrap();
//!
//! // floor((4 + 1) / 2) = 2
//! assert_eq!(tea.rating(), Rating::TwoStar);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod format;
pub mod money;
pub mod parser;
pub mod product;
pub mod rating;
pub mod review;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use error::{CatalogError, CatalogResult, ValidationError};
pub use format::{Locale, ResourceFormatter};
pub use money::Money;
pub use parser::{ParseSummary, RecordFormat, RecordParser};
pub use product::{Product, ProductId, ProductKind};
pub use rating::{Rateable, Rating};
pub use review::Review;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Base discount rate in basis points (1000 = 10%).
pub const DISCOUNT_RATE_BPS: u32 = 1000;

/// Language tag used when a requested locale is not supported.
pub const DEFAULT_LANGUAGE_TAG: &str = "en-US";
