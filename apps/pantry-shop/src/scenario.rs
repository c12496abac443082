//! # Shop Scenario
//!
//! The scripted walk through the catalog that the binary prints.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  en-US  ──► Tea     (drink)  reviews 4,1,3,1,1,5  ──► report            │
//! │  es-CO  ──► Coffee  (drink)  reviews 5,5,5,4      ──► report            │
//! │  fr-FR  ──► Cake    (food)   reviews 5,4,4,4      ──► report (en-US)    │
//! │                                                                         │
//! │  report locale ──► discounts ──► listing above $2.00 ──► record replay │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here returns text; printing is left to [`crate::run`].

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use pantry_core::{Catalog, Money, ParseSummary, Product, Rating, RecordParser};
use tracing::info;

/// Listing threshold: only products priced above this are shown.
pub const LISTING_MIN_PRICE: Money = Money::from_cents(200);

struct Stock {
    locale: &'static str,
    id: u32,
    name: &'static str,
    price: Money,
    perishable: bool,
    reviews: &'static [(Rating, &'static str)],
}

const STOCK: [Stock; 3] = [
    Stock {
        locale: "en-US",
        id: 101,
        name: "Tea",
        price: Money::from_cents(1199),
        perishable: false,
        reviews: &[
            (Rating::FourStar, "Nice hot cup of tea"),
            (Rating::OneStar, "Rather weak tea"),
            (Rating::ThreeStar, "Fine tea"),
            (Rating::OneStar, "Good tea"),
            (Rating::OneStar, "Just add some lemon"),
            (Rating::FiveStar, "Perfect tea"),
        ],
    },
    Stock {
        locale: "es-CO",
        id: 102,
        name: "Coffee",
        price: Money::from_cents(299),
        perishable: false,
        reviews: &[
            (Rating::FiveStar, "Great coffee"),
            (Rating::FiveStar, "Lovely"),
            (Rating::FiveStar, "Strong and fresh"),
            (Rating::FourStar, "Good"),
        ],
    },
    Stock {
        locale: "fr-FR",
        id: 103,
        name: "Cake",
        price: Money::from_cents(299),
        perishable: true,
        reviews: &[
            (Rating::FiveStar, "Very nice cake"),
            (Rating::FourStar, "It good, but could have been sweeter"),
            (Rating::FourStar, "Not bad"),
            (Rating::FourStar, "Fine"),
        ],
    },
];

/// Creates and reviews the three demo products, one locale each, and returns
/// the report printed after each.
pub fn stock_catalog(catalog: &mut Catalog, today: NaiveDate) -> Vec<String> {
    let mut reports = Vec::with_capacity(STOCK.len());

    for stock in &STOCK {
        catalog.change_locale(stock.locale);

        let best_before = stock.perishable.then_some(today);
        catalog.create_product(stock.id, stock.name, stock.price, Rating::NotRated, best_before);

        let mut latest = None;
        for (rating, comment) in stock.reviews {
            latest = catalog.review_product(stock.id, *rating, comment).or(latest);
        }

        if let Some(product) = latest {
            info!(product_id = product.id(), rating = %product.rating(), "Stocked");
            reports.push(catalog.product_report_on(&product, today));
        }
    }

    reports
}

/// One `stars<TAB>amount` line per rating group.
pub fn discount_lines(discounts: &BTreeMap<String, String>) -> Vec<String> {
    discounts
        .iter()
        .map(|(stars, amount)| format!("{}\t{}", stars, amount))
        .collect()
}

/// Orders by rating, then price, both ascending.
pub fn by_rating_then_price(a: &Product, b: &Product) -> Ordering {
    a.rating()
        .cmp(&b.rating())
        .then_with(|| a.price().cmp(&b.price()))
}

/// Products priced above [`LISTING_MIN_PRICE`].
pub fn listing(catalog: &Catalog, today: NaiveDate) -> String {
    catalog.products_report_on(
        today,
        |p| p.price() > LISTING_MIN_PRICE,
        by_rating_then_price,
    )
}

/// Summaries from replaying product and review record text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Replay {
    pub products: Option<ParseSummary>,
    pub reviews: Option<ParseSummary>,
}

/// Feeds record text through the batch parser, products first.
pub fn replay(
    catalog: &mut Catalog,
    parser: &RecordParser,
    products: Option<&str>,
    reviews: Option<&str>,
) -> Replay {
    Replay {
        products: products.map(|text| parser.parse_products(catalog, text)),
        reviews: reviews.map(|text| parser.parse_reviews(catalog, text)),
    }
}
