//! # Record Parser
//!
//! Decodes delimited text lines into catalog calls.
//!
//! ## Record Formats (default delimiter `,`)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product:  type, id, name, price, stars [, best_before]                │
//! │            D,101,Tea,11.99,2                 → Drink                    │
//! │            F,103,Cake,2.99,4,2026-10-19      → Food                     │
//! │                                                                         │
//! │  Review:   id, stars, comment                                          │
//! │            101,4,Rather nice, a bit weak     → comment keeps commas    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Policy
//! Every line stands alone. A rejected line is logged with its raw text and
//! leaves the catalog untouched; nothing escapes `parse_*` calls, so a batch
//! always runs to the end.

use chrono::NaiveDate;
use std::fmt;
use tracing::warn;

use crate::catalog::Catalog;
use crate::error::{CatalogError, CatalogResult, ValidationError};
use crate::money::Money;
use crate::product::{Product, ProductId, ProductKind};
use crate::rating::Rating;
use crate::validation::{parse_integer, parse_price, validate_product_name};

// =============================================================================
// Record Format
// =============================================================================

/// Delimiter and date pattern for record lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFormat {
    pub delimiter: char,
    /// `chrono` strftime pattern for best-before dates.
    pub date_format: String,
}

impl Default for RecordFormat {
    fn default() -> Self {
        RecordFormat {
            delimiter: ',',
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

// =============================================================================
// Decoded Records
// =============================================================================

/// A decoded product line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub kind: ProductKind,
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub rating: Rating,
    /// Present for Food only.
    pub best_before: Option<NaiveDate>,
}

/// A decoded review line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRecord {
    pub id: ProductId,
    pub rating: Rating,
    pub comment: String,
}

/// Outcome of a batch parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseSummary {
    pub accepted: usize,
    pub rejected: usize,
}

impl fmt::Display for ParseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} accepted, {} rejected", self.accepted, self.rejected)
    }
}

// =============================================================================
// Record Parser
// =============================================================================

/// Turns record lines into catalog entries and reviews.
#[derive(Debug, Clone, Default)]
pub struct RecordParser {
    format: RecordFormat,
}

impl RecordParser {
    pub fn new(format: RecordFormat) -> Self {
        RecordParser { format }
    }

    pub fn format(&self) -> &RecordFormat {
        &self.format
    }

    /// Decodes a product line without touching any catalog.
    pub fn decode_product(&self, text: &str) -> CatalogResult<ProductRecord> {
        let fields: Vec<&str> = text.split(self.format.delimiter).map(str::trim).collect();

        let code = fields[0];
        let kind = ProductKind::from_code(code).ok_or_else(|| CatalogError::InvalidProductType {
            record: text.to_string(),
            code: code.to_string(),
        })?;

        let field_count_ok = match kind {
            ProductKind::Drink => fields.len() == 5 || fields.len() == 6,
            ProductKind::Food => fields.len() == 6,
        };
        if !field_count_ok {
            let expected = match kind {
                ProductKind::Drink => "5 or 6",
                ProductKind::Food => "6",
            };
            return Err(CatalogError::malformed(
                text,
                format!("expected {} fields, found {}", expected, fields.len()),
            ));
        }

        let bad = |err: ValidationError| CatalogError::malformed(text, err.to_string());

        let id = parse_integer::<ProductId>("id", fields[1]).map_err(bad)?;
        let name = validate_product_name(fields[2]).map_err(bad)?.to_string();
        let price = parse_price(fields[3]).map_err(bad)?;
        let rating = Rating::convert(parse_integer::<i32>("rating", fields[4]).map_err(bad)?);

        let best_before = match kind {
            ProductKind::Drink => None,
            ProductKind::Food => Some(self.decode_date(text, fields[5])?),
        };

        Ok(ProductRecord {
            kind,
            id,
            name,
            price,
            rating,
            best_before,
        })
    }

    /// Decodes a review line without touching any catalog.
    pub fn decode_review(&self, text: &str) -> CatalogResult<ReviewRecord> {
        let fields: Vec<&str> = text.splitn(3, self.format.delimiter).collect();
        if fields.len() != 3 {
            return Err(CatalogError::malformed(
                text,
                format!("expected 3 fields, found {}", fields.len()),
            ));
        }

        let bad = |err: ValidationError| CatalogError::malformed(text, err.to_string());

        let id = parse_integer::<ProductId>("id", fields[0]).map_err(bad)?;
        let rating = Rating::convert(parse_integer::<i32>("rating", fields[1]).map_err(bad)?);

        Ok(ReviewRecord {
            id,
            rating,
            comment: fields[2].trim().to_string(),
        })
    }

    fn decode_date(&self, text: &str, token: &str) -> CatalogResult<NaiveDate> {
        NaiveDate::parse_from_str(token, &self.format.date_format).map_err(|err| {
            CatalogError::malformed(
                text,
                format!("best before '{}' is not a date: {}", token, err),
            )
        })
    }

    // =========================================================================
    // Catalog Application
    // =========================================================================

    /// Decodes a product line and creates it in `catalog`.
    pub fn try_parse_product(&self, catalog: &mut Catalog, text: &str) -> CatalogResult<Product> {
        let record = self.decode_product(text)?;
        Ok(catalog.create_product(
            record.id,
            &record.name,
            record.price,
            record.rating,
            record.best_before,
        ))
    }

    /// Decodes a review line and attaches it to the product it names.
    pub fn try_parse_review(&self, catalog: &mut Catalog, text: &str) -> CatalogResult<Product> {
        let record = self.decode_review(text)?;
        let product = catalog.find_product(record.id)?.clone();
        Ok(catalog.review(&product, record.rating, &record.comment))
    }

    /// Like [`try_parse_product`](RecordParser::try_parse_product), but a
    /// failure is logged and yields `None`.
    pub fn parse_product(&self, catalog: &mut Catalog, text: &str) -> Option<Product> {
        self.try_parse_product(catalog, text)
            .map_err(|err| warn!(record = %text, error = %err, "Error parsing product"))
            .ok()
    }

    /// Like [`try_parse_review`](RecordParser::try_parse_review), but a
    /// failure is logged and yields `None`.
    pub fn parse_review(&self, catalog: &mut Catalog, text: &str) -> Option<Product> {
        self.try_parse_review(catalog, text)
            .map_err(|err| warn!(record = %text, error = %err, "Error parsing review"))
            .ok()
    }

    /// Applies every non-blank line as a product record.
    pub fn parse_products(&self, catalog: &mut Catalog, text: &str) -> ParseSummary {
        parse_lines(text, |line| self.parse_product(catalog, line).is_some())
    }

    /// Applies every non-blank line as a review record.
    pub fn parse_reviews(&self, catalog: &mut Catalog, text: &str) -> ParseSummary {
        parse_lines(text, |line| self.parse_review(catalog, line).is_some())
    }
}

fn parse_lines(text: &str, mut apply: impl FnMut(&str) -> bool) -> ParseSummary {
    let mut summary = ParseSummary::default();
    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if apply(line) {
            summary.accepted += 1;
        } else {
            summary.rejected += 1;
        }
    }
    summary
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> RecordParser {
        RecordParser::default()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_drink() {
        let mut catalog = Catalog::default();
        let tea = parser().parse_product(&mut catalog, "D,101,Tea,11.99,2").unwrap();

        assert_eq!(tea.kind(), ProductKind::Drink);
        assert_eq!(tea.rating(), Rating::TwoStar);
        assert_eq!(tea.price().cents(), 1199);
        assert_eq!(catalog.find_product(101).unwrap().name(), "Tea");
    }

    #[test]
    fn test_parse_drink_ignores_trailing_date() {
        let record = parser().decode_product("D,101,Tea,11.99,2,not-a-date").unwrap();
        assert_eq!(record.kind, ProductKind::Drink);
        assert_eq!(record.best_before, None);
    }

    #[test]
    fn test_parse_food() {
        let mut catalog = Catalog::default();
        let cake = parser()
            .parse_product(&mut catalog, "F, 103, Cake, 2.99, 4, 2026-10-19")
            .unwrap();

        assert_eq!(cake.kind(), ProductKind::Food);
        assert_eq!(cake.best_before_on(date(2000, 1, 1)), date(2026, 10, 19));
        assert_eq!(cake.rating(), Rating::FourStar);
    }

    #[test]
    fn test_out_of_range_stars_are_not_rated() {
        let record = parser().decode_product("D,1,Tea,1.00,9").unwrap();
        assert_eq!(record.rating, Rating::NotRated);
    }

    #[test]
    fn test_invalid_product_type() {
        let err = parser().decode_product("X,101,Tea,11.99,2").unwrap_err();
        assert_eq!(
            err,
            CatalogError::InvalidProductType {
                record: "X,101,Tea,11.99,2".to_string(),
                code: "X".to_string(),
            }
        );
        assert!(matches!(
            parser().decode_product("").unwrap_err(),
            CatalogError::InvalidProductType { .. }
        ));
    }

    #[test]
    fn test_malformed_products() {
        for text in [
            "D,abc,Tea,11.99,2",
            "D,101,Tea,cheap,2",
            "D,101,Tea,11.99,Two",
            "D,101,,11.99,2",
            "D,101,Tea,-1.00,2",
            "D,101,Tea,11.99",
            "D,101,Tea,11.99,2,2026-01-01,extra",
            "F,103,Cake,2.99,4",
            "F,103,Cake,2.99,4,19/10/2026",
        ] {
            assert!(
                matches!(
                    parser().decode_product(text),
                    Err(CatalogError::MalformedRecord { .. })
                ),
                "expected malformed: {}",
                text
            );
        }
    }

    #[test]
    fn test_decode_review_keeps_delimiters_in_comment() {
        let record = parser().decode_review("101,4,Rather nice, a bit weak").unwrap();
        assert_eq!(record.id, 101);
        assert_eq!(record.rating, Rating::FourStar);
        assert_eq!(record.comment, "Rather nice, a bit weak");
    }

    #[test]
    fn test_malformed_reviews() {
        for text in ["1010,Two,comment", "x,2,comment", "1010,2", ""] {
            assert!(matches!(
                parser().decode_review(text),
                Err(CatalogError::MalformedRecord { .. })
            ));
        }
    }

    #[test]
    fn test_review_for_unknown_product() {
        let mut catalog = Catalog::default();
        parser().parse_product(&mut catalog, "D,101,Tea,11.99,2");

        assert_eq!(
            parser().try_parse_review(&mut catalog, "1010,2,comment").unwrap_err(),
            CatalogError::ProductNotFound(1010)
        );
        assert!(parser().parse_review(&mut catalog, "1010,2,comment").is_none());
        assert_eq!(catalog.len(), 1);
        assert!(catalog.reviews(101).unwrap().is_empty());
    }

    #[test]
    fn test_parse_review_rerates() {
        let mut catalog = Catalog::default();
        let p = parser();
        p.parse_product(&mut catalog, "D,101,Tea,11.99,0");
        p.parse_review(&mut catalog, "101,4,good");
        let tea = p.parse_review(&mut catalog, "101,1,bad").unwrap();
        assert_eq!(tea.rating(), Rating::TwoStar);
    }

    #[test]
    fn test_batch_continues_after_bad_lines() {
        let mut catalog = Catalog::default();
        let p = parser();

        let products = p.parse_products(
            &mut catalog,
            "D,101,Tea,11.99,2\n\nX,102,Bad,1.00,1\nF,103,Cake,2.99,0,2026-10-19\n",
        );
        assert_eq!(products, ParseSummary { accepted: 2, rejected: 1 });

        let reviews = p.parse_reviews(
            &mut catalog,
            "101,5,Love it\n1010,Two,comment\n1010,2,comment\n103,3,Fine\n",
        );
        assert_eq!(reviews, ParseSummary { accepted: 2, rejected: 2 });
        assert_eq!(catalog.reviews(101).unwrap().len(), 1);
        assert_eq!(catalog.reviews(103).unwrap().len(), 1);
        assert_eq!(reviews.to_string(), "2 accepted, 2 rejected");
    }

    #[test]
    fn test_oversized_prices_rejected() {
        let mut catalog = Catalog::default();
        let lines: String = (1..=11)
            .map(|id| format!("F,{},Gold,92233720368547758.07,3,2026-10-19\n", id))
            .collect();

        let summary = parser().parse_products(&mut catalog, &lines);
        assert_eq!(summary, ParseSummary { accepted: 0, rejected: 11 });
        assert!(catalog.is_empty());

        let noon = date(2026, 10, 19).and_hms_opt(12, 0, 0).unwrap();
        assert!(catalog.discounts_at(noon).is_empty());
    }

    #[test]
    fn test_custom_format() {
        let p = RecordParser::new(RecordFormat {
            delimiter: ';',
            date_format: "%d/%m/%Y".to_string(),
        });
        let err = p.decode_product("F;7;Pan dulce;1,50;3;24/12/2026").unwrap_err();
        assert!(matches!(err, CatalogError::MalformedRecord { .. }));

        let record = p.decode_product("F;7;Pan dulce;1.50;3;24/12/2026").unwrap();
        assert_eq!(record.best_before, Some(date(2026, 12, 24)));
        assert_eq!(record.price.cents(), 150);
    }
}
