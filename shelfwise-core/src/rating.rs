//! Star ratings with validated bounds.

use thiserror::Error;

/// Lowest accepted star rating.
pub const MIN_RATING: u8 = 1;

/// Highest accepted star rating.
pub const MAX_RATING: u8 = 5;

/// Threshold at which a rating counts as a strong recommendation signal.
pub const HIGH_RATING_MIN: u8 = 4;

/// Error returned by [`Rating::new`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RatingError {
    /// The value fell outside the accepted star range.
    #[error("rating {value} must be between {MIN_RATING} and {MAX_RATING}")]
    OutOfRange {
        /// Value supplied by the caller.
        value: u8,
    },
}

/// One reader's star rating of one book.
///
/// At most one rating exists per `(user_id, book_id)` pair; upsert
/// semantics belong to the storage collaborator.
///
/// # Examples
/// ```
/// use shelfwise_core::Rating;
///
/// # fn main() -> Result<(), shelfwise_core::RatingError> {
/// let rating = Rating::new(1, 42, 5)?;
/// assert_eq!(rating.value, 5);
/// assert!(rating.is_high());
/// assert!(Rating::new(1, 42, 6).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rating {
    /// Reader who rated the book.
    pub user_id: u64,
    /// Rated book.
    pub book_id: u64,
    /// Stars in `MIN_RATING..=MAX_RATING`.
    pub value: u8,
}

impl Rating {
    /// Validate and construct a rating.
    ///
    /// # Errors
    /// Returns [`RatingError::OutOfRange`] when `value` is not within
    /// `MIN_RATING..=MAX_RATING`.
    pub const fn new(user_id: u64, book_id: u64, value: u8) -> Result<Self, RatingError> {
        if value < MIN_RATING || value > MAX_RATING {
            return Err(RatingError::OutOfRange { value });
        }
        Ok(Self {
            user_id,
            book_id,
            value,
        })
    }

    /// Whether the rating is a strong signal (four stars or more).
    #[must_use]
    pub const fn is_high(&self) -> bool {
        self.value >= HIGH_RATING_MIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(5)]
    fn accepts_in_range_values(#[case] value: u8) {
        assert!(Rating::new(1, 2, value).is_ok());
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    fn rejects_out_of_range_values(#[case] value: u8) {
        assert_eq!(
            Rating::new(1, 2, value),
            Err(RatingError::OutOfRange { value })
        );
    }

    #[rstest]
    #[case(3, false)]
    #[case(4, true)]
    #[case(5, true)]
    fn high_threshold_sits_at_four_stars(#[case] value: u8, #[case] expected: bool) {
        let rating = Rating::new(1, 2, value).unwrap_or(Rating {
            user_id: 1,
            book_id: 2,
            value,
        });
        assert_eq!(rating.is_high(), expected);
    }
}
