//! # Products
//!
//! A product is exactly one of two kinds:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Product Variants                                │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌──────────────────────────┐      │
//! │  │   Drink                  │        │   Food                   │      │
//! │  │  ──────────────────────  │        │  ──────────────────────  │      │
//! │  │  id, name, price, rating │        │  id, name, price, rating │      │
//! │  │                          │        │  best_before             │      │
//! │  │  best before: today      │        │  best before: stored     │      │
//! │  │  discount: 17:30-20:00   │        │  discount: on that day   │      │
//! │  └──────────────────────────┘        └──────────────────────────┘      │
//! │                                                                         │
//! │  Discount when it applies: 10% of price, half-up to the cent           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Two products are equal (and hash alike) when their ids match, whatever
//! their name, price or rating. Re-rating returns a new value with the same
//! id, so the catalog can swap snapshots without losing the review list.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::money::Money;
use crate::rating::{Rateable, Rating};
use crate::DISCOUNT_RATE_BPS;

/// Product identifier.
pub type ProductId = u32;

/// First minute of the evening drink discount (17:30).
const DRINK_DISCOUNT_FROM_MINUTE: u32 = 17 * 60 + 30;

/// First minute after the evening drink discount (20:00).
const DRINK_DISCOUNT_UNTIL_MINUTE: u32 = 20 * 60;

// =============================================================================
// Product Kind
// =============================================================================

/// Which variant a product is, without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    Drink,
    Food,
}

impl ProductKind {
    /// Looks up a single-letter record code. Codes are case-sensitive.
    pub fn from_code(code: &str) -> Option<ProductKind> {
        match code {
            "D" => Some(ProductKind::Drink),
            "F" => Some(ProductKind::Food),
            _ => None,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A sellable item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Product {
    Drink {
        id: ProductId,
        name: String,
        price: Money,
        rating: Rating,
    },
    Food {
        id: ProductId,
        name: String,
        price: Money,
        rating: Rating,
        best_before: NaiveDate,
    },
}

impl Product {
    pub fn drink(id: ProductId, name: impl Into<String>, price: Money, rating: Rating) -> Self {
        Product::Drink {
            id,
            name: name.into(),
            price,
            rating,
        }
    }

    pub fn food(
        id: ProductId,
        name: impl Into<String>,
        price: Money,
        rating: Rating,
        best_before: NaiveDate,
    ) -> Self {
        Product::Food {
            id,
            name: name.into(),
            price,
            rating,
            best_before,
        }
    }

    #[inline]
    pub fn id(&self) -> ProductId {
        match self {
            Product::Drink { id, .. } | Product::Food { id, .. } => *id,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        match self {
            Product::Drink { name, .. } | Product::Food { name, .. } => name,
        }
    }

    #[inline]
    pub fn price(&self) -> Money {
        match self {
            Product::Drink { price, .. } | Product::Food { price, .. } => *price,
        }
    }

    #[inline]
    pub fn rating(&self) -> Rating {
        match self {
            Product::Drink { rating, .. } | Product::Food { rating, .. } => *rating,
        }
    }

    pub fn kind(&self) -> ProductKind {
        match self {
            Product::Drink { .. } => ProductKind::Drink,
            Product::Food { .. } => ProductKind::Food,
        }
    }

    /// Best-before date as seen on `today`.
    ///
    /// Drinks never expire, so they report whatever day it is.
    pub fn best_before_on(&self, today: NaiveDate) -> NaiveDate {
        match self {
            Product::Drink { .. } => today,
            Product::Food { best_before, .. } => *best_before,
        }
    }

    /// Best-before date against the local clock.
    pub fn best_before(&self) -> NaiveDate {
        self.best_before_on(Local::now().date_naive())
    }

    /// The undiscounted-day rate: 10% of price, half-up to the cent.
    pub fn base_discount(&self) -> Money {
        self.price().percentage(DISCOUNT_RATE_BPS)
    }

    /// Discount at a given local date and time.
    ///
    /// ## Rules
    /// - Drink: base discount from 17:30 up to (not including) 20:00
    /// - Food: base discount only on the best-before day itself
    /// - Otherwise zero
    pub fn discount_at(&self, now: NaiveDateTime) -> Money {
        let applies = match self {
            Product::Drink { .. } => in_drink_discount_window(now.time()),
            Product::Food { best_before, .. } => *best_before == now.date(),
        };

        if applies {
            self.base_discount()
        } else {
            Money::zero()
        }
    }

    /// Discount against the local clock.
    pub fn discount(&self) -> Money {
        self.discount_at(Local::now().naive_local())
    }
}

fn in_drink_discount_window(time: NaiveTime) -> bool {
    let minute = time.hour() * 60 + time.minute();
    (DRINK_DISCOUNT_FROM_MINUTE..DRINK_DISCOUNT_UNTIL_MINUTE).contains(&minute)
}

impl Rateable for Product {
    fn rating(&self) -> Rating {
        Product::rating(self)
    }

    fn apply_rating(&self, new_rating: Rating) -> Self {
        let mut rated = self.clone();
        match &mut rated {
            Product::Drink { rating, .. } | Product::Food { rating, .. } => *rating = new_rating,
        }
        rated
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Product {}

impl Hash for Product {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind() {
            ProductKind::Drink => "Drink",
            ProductKind::Food => "Food",
        };
        write!(
            f,
            "{}{{id={}, name='{}', price={}, rating={}",
            kind,
            self.id(),
            self.name(),
            self.price(),
            self.rating()
        )?;
        if let Product::Food { best_before, .. } = self {
            write!(f, ", bestBefore={}", best_before)?;
        }
        f.write_str("}")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
