//! # Locale Formatting
//!
//! Renders products, reviews, money and dates for a selected locale.
//!
//! ## Resource Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      ResourceFormatter                                  │
//! │                                                                         │
//! │  Locale ──► Fluent messages     product, review, no-reviews            │
//! │         ──► ICU decimal style   $1,234.56  |  $ 1.234,56                │
//! │         ──► short date style    10/19/26   |  19/10/26                  │
//! │                                                                         │
//! │  Messages take named arguments: $name $price $rating $date $comment   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A formatter is a plain value. Whoever renders output owns one; there is no
//! process-wide registry.

use std::fmt;
use std::rc::Rc;

use chrono::NaiveDate;
use fixed_decimal::FixedDecimal;
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource};
use icu::decimal::options::{FixedDecimalFormatterOptions, GroupingStrategy};
use icu::decimal::FixedDecimalFormatter;
use tracing::{debug, warn};
use unic_langid::LanguageIdentifier;
use writeable::Writeable;

use crate::money::Money;
use crate::product::Product;
use crate::review::Review;

// =============================================================================
// Locale
// =============================================================================

/// Supported report locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    EnUs,
    EsCo,
}

struct LocaleData {
    tag: &'static str,
    currency_prefix: &'static str,
    date_format: &'static str,
    messages: &'static str,
}

const EN_US: LocaleData = LocaleData {
    tag: "en-US",
    currency_prefix: "$",
    date_format: "%-m/%-d/%y",
    messages: "\
product = { $name }, Price: { $price }, Rating: { $rating }, Best Before: { $date }
review = Review: { $rating }\t{ $comment }
no-reviews = Not reviewed
",
};

const ES_CO: LocaleData = LocaleData {
    tag: "es-CO",
    currency_prefix: "$ ",
    date_format: "%-d/%m/%y",
    messages: "\
product = { $name }, Precio: { $price }, Calificación: { $rating }, Consumir antes de: { $date }
review = Reseña: { $rating }\t{ $comment }
no-reviews = Sin reseñas
",
};

impl Locale {
    /// Resolves a language tag such as `en-US` or `es_CO`.
    ///
    /// Matching ignores case and accepts `_` for `-`. Unknown tags fall back
    /// to [`Locale::EnUs`].
    pub fn from_tag(tag: &str) -> Locale {
        let normalized = tag.trim().replace('_', "-");
        [Locale::EnUs, Locale::EsCo]
            .into_iter()
            .find(|locale| locale.tag().eq_ignore_ascii_case(&normalized))
            .unwrap_or_else(|| {
                debug!(tag = %tag, fallback = Locale::default().tag(), "Unsupported locale");
                Locale::default()
            })
    }

    /// Canonical language tag.
    pub fn tag(self) -> &'static str {
        self.data().tag
    }

    fn data(self) -> &'static LocaleData {
        match self {
            Locale::EnUs => &EN_US,
            Locale::EsCo => &ES_CO,
        }
    }
}

// =============================================================================
// Loaded Resources
// =============================================================================

/// Message bundle and number formatter for one locale.
struct Resources {
    bundle: FluentBundle<FluentResource>,
    /// `None` when ICU has no decimal data for the locale.
    numbers: Option<FixedDecimalFormatter>,
}

impl Resources {
    fn load(data: &LocaleData) -> Resources {
        let lang_id: LanguageIdentifier = data.tag.parse().unwrap_or_default();
        let mut bundle = FluentBundle::new(vec![lang_id]);
        bundle.set_use_isolating(false);

        let resource = FluentResource::try_new(data.messages.to_string()).unwrap_or_else(
            |(partial, errors)| {
                warn!(locale = data.tag, ?errors, "Message resource has syntax errors");
                partial
            },
        );
        if let Err(errors) = bundle.add_resource(resource) {
            warn!(locale = data.tag, ?errors, "Message resource not fully loaded");
        }

        let mut options = FixedDecimalFormatterOptions::default();
        options.grouping_strategy = GroupingStrategy::Always;

        let numbers = data
            .tag
            .parse::<icu::locid::Locale>()
            .map_err(|e| e.to_string())
            .and_then(|locale| {
                FixedDecimalFormatter::try_new(&locale.into(), options).map_err(|e| e.to_string())
            })
            .map_err(|error| warn!(locale = data.tag, %error, "No decimal formatter, using plain digits"))
            .ok();

        Resources { bundle, numbers }
    }
}

// =============================================================================
// Resource Formatter
// =============================================================================

/// Locale-bound renderer for catalog output.
///
/// Cloning shares the loaded resources.
#[derive(Clone)]
pub struct ResourceFormatter {
    locale: Locale,
    resources: Rc<Resources>,
}

impl ResourceFormatter {
    pub fn new(locale: Locale) -> Self {
        ResourceFormatter {
            locale,
            resources: Rc::new(Resources::load(locale.data())),
        }
    }

    /// Formatter for a language tag, falling back to en-US.
    pub fn for_tag(tag: &str) -> Self {
        ResourceFormatter::new(Locale::from_tag(tag))
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Localized message for `key`, or `!key!` when the key is unknown.
    ///
    /// Dotted keys such as `no.reviews` map to dashed message ids.
    pub fn text(&self, key: &str) -> String {
        self.message(key, None)
    }

    /// Currency rendering with grouping.
    ///
    /// ## Example
    /// ```rust
    /// use pantry_core::{Locale, Money, ResourceFormatter};
    ///
    /// let us = ResourceFormatter::new(Locale::EnUs);
    /// assert_eq!(us.format_money(Money::from_cents(123456)), "$1,234.56");
    ///
    /// let co = ResourceFormatter::new(Locale::EsCo);
    /// assert_eq!(co.format_money(Money::from_cents(123456)), "$ 1.234,56");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        let digits = format!("{}.{:02}", amount.dollars().unsigned_abs(), amount.cents_part());

        let number = match &self.resources.numbers {
            Some(formatter) => {
                let value = digits
                    .parse::<FixedDecimal>()
                    .unwrap_or_else(|_| FixedDecimal::from(0));
                formatter.format(&value).write_to_string().into_owned()
            }
            None => digits,
        };

        let sign = if amount.is_negative() { "-" } else { "" };
        format!("{}{}{}", sign, self.locale.data().currency_prefix, number)
    }

    /// Short localized date.
    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(self.locale.data().date_format).to_string()
    }

    /// One product line: name, price, rating glyphs, best-before on `today`.
    pub fn format_product(&self, product: &Product, today: NaiveDate) -> String {
        let mut args = FluentArgs::new();
        args.set("name", product.name());
        args.set("price", self.format_money(product.price()));
        args.set("rating", product.rating().stars());
        args.set("date", self.format_date(product.best_before_on(today)));
        self.message("product", Some(&args))
    }

    /// One review line: rating glyphs and comment.
    pub fn format_review(&self, review: &Review) -> String {
        let mut args = FluentArgs::new();
        args.set("rating", review.rating().stars());
        args.set("comment", review.comment());
        self.message("review", Some(&args))
    }

    fn message(&self, key: &str, args: Option<&FluentArgs>) -> String {
        let bundle = &self.resources.bundle;
        let id = key.replace('.', "-");

        let Some(pattern) = bundle.get_message(&id).and_then(|msg| msg.value()) else {
            return format!("!{}!", key);
        };

        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            debug!(key = %key, ?errors, "Message formatted with errors");
        }
        value.into_owned()
    }
}

impl Default for ResourceFormatter {
    fn default() -> Self {
        ResourceFormatter::new(Locale::default())
    }
}

impl fmt::Debug for ResourceFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceFormatter")
            .field("locale", &self.locale)
            .field("decimal_data", &self.resources.numbers.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::Rating;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 9).unwrap()
    }

    #[test]
    fn test_locale_from_tag() {
        assert_eq!(Locale::from_tag("en-US"), Locale::EnUs);
        assert_eq!(Locale::from_tag("es-CO"), Locale::EsCo);
        assert_eq!(Locale::from_tag("es_co"), Locale::EsCo);
        assert_eq!(Locale::from_tag("fr-FR"), Locale::EnUs);
        assert_eq!(Locale::from_tag(""), Locale::EnUs);
    }

    #[test]
    fn test_money_en_us() {
        let f = ResourceFormatter::new(Locale::EnUs);
        assert_eq!(f.format_money(Money::from_cents(1199)), "$11.99");
        assert_eq!(f.format_money(Money::from_cents(5)), "$0.05");
        assert_eq!(f.format_money(Money::from_cents(100_000_00)), "$100,000.00");
        assert_eq!(f.format_money(Money::from_cents(-1234_56)), "-$1,234.56");
    }

    #[test]
    fn test_money_es_co() {
        let f = ResourceFormatter::new(Locale::EsCo);
        assert_eq!(f.format_money(Money::from_cents(299)), "$ 2,99");
        assert_eq!(f.format_money(Money::from_cents(1_234_567_89)), "$ 1.234.567,89");
    }

    #[test]
    fn test_dates() {
        assert_eq!(ResourceFormatter::new(Locale::EnUs).format_date(day()), "10/9/26");
        assert_eq!(ResourceFormatter::new(Locale::EsCo).format_date(day()), "9/10/26");
    }

    #[test]
    fn test_format_product() {
        let tea = Product::drink(101, "Tea", Money::from_cents(1199), Rating::TwoStar);
        assert_eq!(
            ResourceFormatter::new(Locale::EnUs).format_product(&tea, day()),
            "Tea, Price: $11.99, Rating: ★★☆☆☆, Best Before: 10/9/26"
        );
        assert_eq!(
            ResourceFormatter::new(Locale::EsCo).format_product(&tea, day()),
            "Tea, Precio: $ 11,99, Calificación: ★★☆☆☆, Consumir antes de: 9/10/26"
        );
    }

    #[test]
    fn test_format_review() {
        let review = Review::new(Rating::FiveStar, "Love it");
        assert_eq!(
            ResourceFormatter::new(Locale::EnUs).format_review(&review),
            "Review: ★★★★★\tLove it"
        );
    }

    #[test]
    fn test_text_lookup() {
        let f = ResourceFormatter::new(Locale::EsCo);
        assert_eq!(f.text("no.reviews"), "Sin reseñas");
        assert_eq!(f.text("missing.key"), "!missing.key!");
    }

    #[test]
    fn test_text_dotted_key_maps_to_message_id() {
        let f = ResourceFormatter::new(Locale::EnUs);
        assert_eq!(f.text("no.reviews"), "Not reviewed");
        assert_eq!(f.text("no-reviews"), "Not reviewed");
    }

    #[test]
    fn test_no_bidi_isolation_marks() {
        let review = Review::new(Rating::OneStar, "Hate it");
        let line = ResourceFormatter::new(Locale::EsCo).format_review(&review);
        assert_eq!(line, "Reseña: ★☆☆☆☆\tHate it");
        assert!(!line.contains('\u{2068}') && !line.contains('\u{2069}'));
    }

    #[test]
    fn test_clones_share_resources() {
        let f = ResourceFormatter::new(Locale::EsCo);
        let g = f.clone();
        assert!(Rc::ptr_eq(&f.resources, &g.resources));
        assert_eq!(g.locale(), Locale::EsCo);
        assert_eq!(ResourceFormatter::default().locale(), Locale::EnUs);
    }
}
