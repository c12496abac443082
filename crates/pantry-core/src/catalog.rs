//! # Catalog
//!
//! The in-memory store that ties every product to its reviews.
//!
//! ## Storage Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Table                                   │
//! │                                                                         │
//! │   id ──► Entry { product snapshot, reviews (insertion order) }         │
//! │                                                                         │
//! │   101 ──► Drink  Tea    ★★☆☆☆   [★★★★☆ ★☆☆☆☆ ★★★☆☆ ...]             │
//! │   102 ──► Drink  Coffee ★★★★☆   [★★★★★ ★★★★★ ★★★★★ ★★★★☆]             │
//! │   103 ──► Food   Cake   ★★★★☆   [★★★★★ ★★★★☆ ★★★★☆ ★★★★☆]             │
//! │                                                                         │
//! │   review(): append ──► re-average ──► overwrite snapshot at same id   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rating Recomputation
//! After every new review the product rating becomes
//! `convert(floor(mean(ordinals of all its reviews)))`.
//!
//! ## Lookup Failures
//! Queries by id return `Err(ProductNotFound)`. The one command by id,
//! [`Catalog::review_product`], logs the miss and returns `None`.

use chrono::{Local, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::error::{CatalogError, CatalogResult};
use crate::format::ResourceFormatter;
use crate::money::Money;
use crate::product::{Product, ProductId};
use crate::rating::{Rateable, Rating};
use crate::review::{sort_reviews, Review};

/// One catalog row.
#[derive(Debug, Clone)]
struct Entry {
    product: Product,
    reviews: Vec<Review>,
}

/// Products and their reviews, plus the formatter used for reports.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: BTreeMap<ProductId, Entry>,
    formatter: ResourceFormatter,
}

impl Catalog {
    /// Creates an empty catalog rendering through `formatter`.
    pub fn new(formatter: ResourceFormatter) -> Self {
        Catalog {
            entries: BTreeMap::new(),
            formatter,
        }
    }

    /// Creates an empty catalog for a language tag (unknown tags use en-US).
    pub fn for_locale(tag: &str) -> Self {
        Catalog::new(ResourceFormatter::for_tag(tag))
    }

    /// Switches report rendering to another language tag.
    pub fn change_locale(&mut self, tag: &str) {
        self.formatter = ResourceFormatter::for_tag(tag);
        debug!(locale = self.formatter.locale().tag(), "Catalog locale changed");
    }

    pub fn formatter(&self) -> &ResourceFormatter {
        &self.formatter
    }

    // =========================================================================
    // Creation
    // =========================================================================

    /// Creates a Food (with `best_before`) or a Drink (without).
    ///
    /// The product is stored only if its id is new. An existing entry, and
    /// its reviews, are left alone; the freshly built value is still returned.
    pub fn create_product(
        &mut self,
        id: ProductId,
        name: &str,
        price: Money,
        rating: Rating,
        best_before: Option<NaiveDate>,
    ) -> Product {
        let product = match best_before {
            Some(date) => Product::food(id, name, price, rating, date),
            None => Product::drink(id, name, price, rating),
        };

        match self.entries.get(&id) {
            Some(existing) => {
                debug!(
                    product_id = id,
                    existing = %existing.product.name(),
                    "Product id already present, keeping existing entry"
                );
            }
            None => {
                debug!(product_id = id, kind = ?product.kind(), "Product created");
                self.entries.insert(
                    id,
                    Entry {
                        product: product.clone(),
                        reviews: Vec::new(),
                    },
                );
            }
        }

        product
    }

    pub fn create_drink(&mut self, id: ProductId, name: &str, price: Money, rating: Rating) -> Product {
        self.create_product(id, name, price, rating, None)
    }

    pub fn create_food(
        &mut self,
        id: ProductId,
        name: &str,
        price: Money,
        rating: Rating,
        best_before: NaiveDate,
    ) -> Product {
        self.create_product(id, name, price, rating, Some(best_before))
    }

    // =========================================================================
    // Reviews
    // =========================================================================

    /// Adds a review to the product with this id.
    ///
    /// Returns the re-rated product, or `None` (logged) if the id is unknown.
    pub fn review_product(
        &mut self,
        id: ProductId,
        rating: Rating,
        comment: &str,
    ) -> Option<Product> {
        match self.find_product(id).cloned() {
            Ok(product) => Some(self.review(&product, rating, comment)),
            Err(err) => {
                info!(product_id = id, "{}", err);
                None
            }
        }
    }

    /// Adds a review to `product` and returns the re-rated snapshot.
    ///
    /// A product that is not in the catalog yet starts a new entry with no
    /// earlier reviews.
    pub fn review(&mut self, product: &Product, rating: Rating, comment: &str) -> Product {
        let mut reviews = self
            .entries
            .remove(&product.id())
            .map(|entry| entry.reviews)
            .unwrap_or_default();

        reviews.push(Review::new(rating, comment));

        let rated = product.apply_rating(average_rating(&reviews));
        debug!(
            product_id = rated.id(),
            reviews = reviews.len(),
            rating = ?rated.rating(),
            "Product reviewed"
        );

        self.entries.insert(
            rated.id(),
            Entry {
                product: rated.clone(),
                reviews,
            },
        );
        rated
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Current snapshot of the product with this id.
    pub fn find_product(&self, id: ProductId) -> CatalogResult<&Product> {
        self.entry(id).map(|entry| &entry.product)
    }

    /// Reviews of a product, oldest first.
    pub fn reviews(&self, id: ProductId) -> CatalogResult<&[Review]> {
        self.entry(id).map(|entry| entry.reviews.as_slice())
    }

    /// All current product snapshots, in id order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.entries.values().map(|entry| &entry.product)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, id: ProductId) -> CatalogResult<&Entry> {
        self.entries
            .get(&id)
            .ok_or(CatalogError::ProductNotFound(id))
    }

    // =========================================================================
    // Discounts
    // =========================================================================

    /// Total discount per rating group at `now`, keyed by rating glyphs and
    /// rendered as localized currency.
    pub fn discounts_at(&self, now: NaiveDateTime) -> BTreeMap<String, String> {
        let mut totals: BTreeMap<&'static str, Money> = BTreeMap::new();
        for product in self.products() {
            let total = totals.entry(product.rating().stars()).or_default();
            *total = total.saturating_add(product.discount_at(now));
        }

        totals
            .into_iter()
            .map(|(stars, total)| (stars.to_string(), self.formatter.format_money(total)))
            .collect()
    }

    /// [`discounts_at`](Catalog::discounts_at) against the local clock.
    pub fn discounts(&self) -> BTreeMap<String, String> {
        self.discounts_at(Local::now().naive_local())
    }

    // =========================================================================
    // Reports
    // =========================================================================

    /// Renders every product passing `filter`, ordered by `sorter`, one per
    /// line, with best-before dates as of `today`.
    pub fn products_report_on<F, S>(&self, today: NaiveDate, filter: F, mut sorter: S) -> String
    where
        F: Fn(&Product) -> bool,
        S: FnMut(&Product, &Product) -> Ordering,
    {
        let mut selected: Vec<&Product> = self.products().filter(|p| filter(*p)).collect();
        selected.sort_by(|a, b| sorter(*a, *b));

        selected
            .into_iter()
            .map(|product| self.formatter.format_product(product, today))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// [`products_report_on`](Catalog::products_report_on) for today.
    pub fn products_report<F, S>(&self, filter: F, sorter: S) -> String
    where
        F: Fn(&Product) -> bool,
        S: FnMut(&Product, &Product) -> Ordering,
    {
        self.products_report_on(Local::now().date_naive(), filter, sorter)
    }

    /// Report for one product by id.
    pub fn product_report(&self, id: ProductId) -> CatalogResult<String> {
        let product = self.find_product(id)?;
        Ok(self.product_report_for(product))
    }

    /// Report for a product value, using the reviews stored under its id.
    pub fn product_report_for(&self, product: &Product) -> String {
        self.product_report_on(product, Local::now().date_naive())
    }

    /// Product line followed by its reviews (highest rating first), or by the
    /// localized "no reviews" marker when there are none.
    pub fn product_report_on(&self, product: &Product, today: NaiveDate) -> String {
        let mut reviews = self
            .entries
            .get(&product.id())
            .map(|entry| entry.reviews.clone())
            .unwrap_or_default();
        sort_reviews(&mut reviews);

        let mut lines = vec![self.formatter.format_product(product, today)];
        if reviews.is_empty() {
            lines.push(self.formatter.text("no.reviews"));
        } else {
            lines.extend(reviews.iter().map(|r| self.formatter.format_review(r)));
        }
        lines.join("\n")
    }
}

/// `convert(floor(mean(ordinals)))`, or `NotRated` for no reviews.
fn average_rating(reviews: &[Review]) -> Rating {
    if reviews.is_empty() {
        return Rating::NotRated;
    }
    let total: usize = reviews.iter().map(|r| r.rating().ordinal() as usize).sum();
    Rating::convert((total / reviews.len()) as i32)
}

// =============================================================================
// Unit Tests
// =============================================================================
