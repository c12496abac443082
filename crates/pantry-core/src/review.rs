//! # Reviews
//!
//! A review is an immutable rating plus free-text comment. Reports list
//! reviews highest rating first; equal ratings keep the order they were
//! written in.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::rating::Rating;

/// A single customer review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    rating: Rating,
    comment: String,
}

impl Review {
    pub fn new(rating: Rating, comment: impl Into<String>) -> Self {
        Review {
            rating,
            comment: comment.into(),
        }
    }

    #[inline]
    pub fn rating(&self) -> Rating {
        self.rating
    }

    #[inline]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Display order: higher ratings first.
    pub fn display_order(a: &Review, b: &Review) -> Ordering {
        b.rating.ordinal().cmp(&a.rating.ordinal())
    }

    /// Display order where a missing review sorts after any present one.
    pub fn display_order_optional(a: Option<&Review>, b: Option<&Review>) -> Ordering {
        match (a, b) {
            (Some(a), Some(b)) => Review::display_order(a, b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl fmt::Display for Review {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Review{{rating={}, comment=\"{}\"}}", self.rating, self.comment)
    }
}

/// Sorts reviews for display. Stable, so ties keep insertion order.
pub fn sort_reviews(reviews: &mut [Review]) {
    reviews.sort_by(Review::display_order);
}
