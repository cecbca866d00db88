//! Content-based filtering: match book genres against reader interests.

use std::collections::{BTreeSet, HashSet};

use log::{debug, info};
use shelfwise_core::similarity::{genre_overlap, normalize_genres, normalize_label, round3};
use shelfwise_core::{CatalogStore, Recommendation, RecommendationSource, StoreError};

use crate::MIN_SIMILARITY_THRESHOLD;

/// How match reasons are phrased, depending on whether the caller is a
/// known reader or an anonymous genre browse.
#[derive(Debug, Clone, Copy)]
enum ReasonStyle {
    Personal,
    Anonymous,
}

impl ReasonStyle {
    fn describe(self, matching: &[&str]) -> String {
        let named: Vec<&str> = matching.iter().copied().take(3).collect();
        match (self, named.is_empty()) {
            (Self::Personal, false) => {
                format!("Matches your interest in {}", named.join(", "))
            }
            (Self::Personal, true) => "Based on your reading preferences".to_owned(),
            (Self::Anonymous, false) => format!("Matches: {}", named.join(", ")),
            (Self::Anonymous, true) => "Related to your selection".to_owned(),
        }
    }
}

/// Scores unrated books by genre overlap with a reader's interests.
///
/// # Examples
/// ```
/// use shelfwise_recommender::ContentRecommender;
///
/// // Default threshold, and a stricter variant for curated surfaces.
/// let _engine = ContentRecommender::new();
/// let _strict = ContentRecommender::with_min_similarity(0.5);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ContentRecommender {
    min_similarity: f32,
}

impl Default for ContentRecommender {
    fn default() -> Self {
        Self {
            min_similarity: MIN_SIMILARITY_THRESHOLD,
        }
    }
}

impl ContentRecommender {
    /// Construct an engine with the default similarity threshold.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct an engine with a custom minimum similarity threshold.
    #[must_use]
    pub const fn with_min_similarity(min_similarity: f32) -> Self {
        Self { min_similarity }
    }

    /// Recommend up to `limit` unrated books for a reader, ranked by
    /// genre overlap with their declared interests.
    ///
    /// A missing reader or an empty interest list yields an empty result:
    /// that is the cold-start signal the orchestrator's fallback keys on,
    /// not an error.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the catalogue backend.
    pub fn recommend<S: CatalogStore + ?Sized>(
        &self,
        store: &S,
        user_id: u64,
        limit: usize,
    ) -> Result<Vec<Recommendation>, StoreError> {
        let Some(reader) = store.user_by_id(user_id)? else {
            debug!("reader {user_id} not found; skipping content-based scoring");
            return Ok(Vec::new());
        };
        if reader.interests.is_empty() {
            debug!("reader {user_id} has no interests; cold-start path");
            return Ok(Vec::new());
        }

        let rated = store.rated_book_ids(user_id)?;
        let recommendations = self.score_catalogue(
            store,
            &reader.interests,
            &rated,
            ReasonStyle::Personal,
            limit,
        )?;
        info!(
            "generated {} content-based recommendations for reader {user_id}",
            recommendations.len()
        );
        Ok(recommendations)
    }

    /// Genre-only variant for anonymous or cold browsing.
    ///
    /// Scores the catalogue against an explicit genre set, excluding the
    /// given book ids instead of a reader's rated set.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the catalogue backend.
    pub fn recommend_for_genres<S: CatalogStore + ?Sized>(
        &self,
        store: &S,
        genres: &[String],
        exclude: &HashSet<u64>,
        limit: usize,
    ) -> Result<Vec<Recommendation>, StoreError> {
        if genres.is_empty() {
            return Ok(Vec::new());
        }
        self.score_catalogue(store, genres, exclude, ReasonStyle::Anonymous, limit)
    }

    fn score_catalogue<S: CatalogStore + ?Sized>(
        &self,
        store: &S,
        interests: &[String],
        exclude: &HashSet<u64>,
        style: ReasonStyle,
        limit: usize,
    ) -> Result<Vec<Recommendation>, StoreError> {
        let interest_set: BTreeSet<String> = normalize_genres(interests);
        let mut recommendations = Vec::new();

        for book in store.all_books()? {
            if exclude.contains(&book.id) {
                continue;
            }
            let score = genre_overlap(interests, &book.genres);
            if score < self.min_similarity {
                continue;
            }
            // Display casing comes from the book's own genre list.
            let matching: Vec<&str> = book
                .genres
                .iter()
                .filter(|genre| interest_set.contains(&normalize_label(genre)))
                .map(String::as_str)
                .collect();
            let reason = style.describe(&matching);
            let avg_rating = store.average_book_rating(book.id)?;
            recommendations.push(
                Recommendation::new(
                    book,
                    round3(score),
                    RecommendationSource::ContentBased,
                    reason,
                )
                .with_avg_rating(avg_rating),
            );
        }

        crate::rank(&mut recommendations, limit);
        Ok(recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn personal_reason_names_up_to_three_genres() {
        let reason = ReasonStyle::Personal.describe(&["Fantasy", "Horror", "Mystery", "Drama"]);
        assert_eq!(reason, "Matches your interest in Fantasy, Horror, Mystery");
    }

    #[test]
    fn empty_match_lists_fall_back_to_generic_reasons() {
        assert_eq!(
            ReasonStyle::Personal.describe(&[]),
            "Based on your reading preferences"
        );
        assert_eq!(ReasonStyle::Anonymous.describe(&[]), "Related to your selection");
    }
}
