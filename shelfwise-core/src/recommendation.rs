//! Derived recommendation records handed to the presentation layer.

use crate::Book;

/// Which engine produced a recommendation.
///
/// # Examples
/// ```
/// use shelfwise_core::RecommendationSource;
///
/// assert_eq!(RecommendationSource::ContentBased.as_str(), "content_based");
/// assert_eq!(RecommendationSource::Fallback.to_string(), "fallback");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecommendationSource {
    /// Genre overlap with the reader's declared interests.
    ContentBased,
    /// Peer ratings weighted by interest similarity.
    Collaborative,
    /// Cold-start composition of popular and recent books.
    Fallback,
}

impl RecommendationSource {
    /// Return the source as its snake_case wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ContentBased => "content_based",
            Self::Collaborative => "collaborative",
            Self::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for RecommendationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RecommendationSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "content_based" => Ok(Self::ContentBased),
            "collaborative" => Ok(Self::Collaborative),
            "fallback" => Ok(Self::Fallback),
            _ => Err(format!("unknown recommendation source '{s}'")),
        }
    }
}

/// A scored book suggestion for one reader.
///
/// Derived per request and never persisted. The score sits in `[0, 1]`
/// and is comparable only within a single source category. The average
/// rating is an externally computed display figure and never feeds back
/// into scoring.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recommendation {
    /// The suggested book.
    pub book: Book,
    /// Relevance score in `[0, 1]`, rounded to three decimals.
    pub score: f32,
    /// Human-readable justification.
    pub reason: String,
    /// Engine that produced the suggestion.
    pub source: RecommendationSource,
    /// Externally computed average rating, for display only.
    pub avg_rating: Option<f32>,
}

impl Recommendation {
    /// Construct a recommendation without display rating data.
    #[must_use]
    pub fn new(
        book: Book,
        score: f32,
        source: RecommendationSource,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            book,
            score,
            reason: reason.into(),
            source,
            avg_rating: None,
        }
    }

    /// Attach the externally computed average rating for display.
    #[must_use]
    pub const fn with_avg_rating(mut self, avg_rating: Option<f32>) -> Self {
        self.avg_rating = avg_rating;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn display_matches_as_str() {
        assert_eq!(
            RecommendationSource::Collaborative.to_string(),
            RecommendationSource::Collaborative.as_str()
        );
    }

    #[test]
    fn parsing_round_trips_labels() {
        for source in [
            RecommendationSource::ContentBased,
            RecommendationSource::Collaborative,
            RecommendationSource::Fallback,
        ] {
            assert_eq!(
                RecommendationSource::from_str(source.as_str()),
                Ok(source)
            );
        }
    }

    #[test]
    fn parsing_rejects_unknown_labels() {
        assert_eq!(
            RecommendationSource::from_str("editorial"),
            Err("unknown recommendation source 'editorial'".to_owned())
        );
    }
}
