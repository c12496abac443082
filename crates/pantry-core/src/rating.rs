//! # Rating Scale
//!
//! The fixed 0..5 star scale shared by products and reviews.
//!
//! ```text
//!   NotRated   ☆☆☆☆☆   0
//!   OneStar    ★☆☆☆☆   1
//!   TwoStar    ★★☆☆☆   2
//!   ThreeStar  ★★★☆☆   3
//!   FourStar   ★★★★☆   4
//!   FiveStar   ★★★★★   5
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A star rating. Ordered by ordinal.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    #[default]
    NotRated,
    OneStar,
    TwoStar,
    ThreeStar,
    FourStar,
    FiveStar,
}

impl Rating {
    /// Every rating, lowest first.
    pub const ALL: [Rating; 6] = [
        Rating::NotRated,
        Rating::OneStar,
        Rating::TwoStar,
        Rating::ThreeStar,
        Rating::FourStar,
        Rating::FiveStar,
    ];

    /// Maps a star count to a rating.
    ///
    /// Anything outside `0..=5` becomes [`Rating::NotRated`]; this never fails.
    ///
    /// ```rust
    /// use pantry_core::Rating;
    ///
    /// assert_eq!(Rating::convert(3), Rating::ThreeStar);
    /// assert_eq!(Rating::convert(-1), Rating::NotRated);
    /// assert_eq!(Rating::convert(6), Rating::NotRated);
    /// ```
    pub fn convert(stars: i32) -> Rating {
        usize::try_from(stars)
            .ok()
            .and_then(|i| Rating::ALL.get(i).copied())
            .unwrap_or_default()
    }

    /// Position on the scale, 0 for `NotRated` up to 5.
    #[inline]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Display glyphs: filled stars for the ordinal, hollow stars for the rest.
    pub const fn stars(self) -> &'static str {
        match self {
            Rating::NotRated => "☆☆☆☆☆",
            Rating::OneStar => "★☆☆☆☆",
            Rating::TwoStar => "★★☆☆☆",
            Rating::ThreeStar => "★★★☆☆",
            Rating::FourStar => "★★★★☆",
            Rating::FiveStar => "★★★★★",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stars())
    }
}

// =============================================================================
// Rateable
// =============================================================================

/// Something that carries a rating and can be re-rated without mutation.
pub trait Rateable: Sized {
    /// The current rating.
    fn rating(&self) -> Rating {
        Rating::default()
    }

    /// Returns a copy carrying `rating` instead of the current one.
    fn apply_rating(&self, rating: Rating) -> Self;

    /// Same as [`apply_rating`](Rateable::apply_rating) from a raw star count.
    fn apply_stars(&self, stars: i32) -> Self {
        self.apply_rating(Rating::convert(stars))
    }
}
