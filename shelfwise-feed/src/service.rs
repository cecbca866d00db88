//! Unified recommendation service with cold-start fallbacks.

use std::collections::HashSet;

use log::info;
use shelfwise_core::similarity::normalize_label;
use shelfwise_core::{
    CatalogStore, HIGH_RATING_MIN, Recommendation, RecommendationSource, StoreError,
};
use shelfwise_recommender::{CollaborativeRecommender, ContentRecommender};

/// Neutral score assigned to popular-book fallback entries.
const POPULAR_FALLBACK_SCORE: f32 = 0.5;

/// Score assigned to recently-added fallback entries.
const RECENT_FALLBACK_SCORE: f32 = 0.3;

/// How many top peers are consulted when explaining a recommendation.
const TOP_PEERS_CONSIDERED: usize = 5;

/// Separator between explanation clauses.
const CLAUSE_SEPARATOR: &str = " \u{2022} ";

/// Generic justification when no specific signal applies.
const GENERIC_REASON: &str = "Based on your reading preferences";

/// Per-category recommendation lists for one reader.
///
/// The fallback list is populated only when both engine lists are empty,
/// signalling a cold start.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecommendationSet {
    /// Genre-overlap matches against the reader's interests.
    pub content_based: Vec<Recommendation>,
    /// Similarity-weighted peer picks.
    pub collaborative: Vec<Recommendation>,
    /// Popular and recent books for cold-start readers.
    pub fallback: Vec<Recommendation>,
}

impl RecommendationSet {
    /// Whether every category came back empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content_based.is_empty() && self.collaborative.is_empty() && self.fallback.is_empty()
    }
}

/// Diagnostic counts describing a reader's recommendation potential.
///
/// Debug surface for operators and user feedback; never consulted by the
/// scoring paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationStats {
    /// Reader the stats describe.
    pub user_id: u64,
    /// Number of declared genre interests.
    pub interest_count: usize,
    /// Number of books the reader has rated.
    pub books_rated: usize,
    /// Number of peers above the similarity threshold.
    pub similar_reader_count: usize,
    /// Whether the content-based engine has anything to work with.
    pub can_use_content_based: bool,
    /// Whether the collaborative engine has qualifying peers.
    pub can_use_collaborative: bool,
}

/// Composes both engines with fallback, feed, and explanation surfaces.
///
/// The service is stateless between calls and holds only engine
/// configuration, so one instance can serve concurrent requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationService {
    content: ContentRecommender,
    collaborative: CollaborativeRecommender,
}

impl RecommendationService {
    /// Construct a service with default engine thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a service from pre-configured engines.
    #[must_use]
    pub const fn with_engines(
        content: ContentRecommender,
        collaborative: CollaborativeRecommender,
    ) -> Self {
        Self {
            content,
            collaborative,
        }
    }

    /// Combined recommendations in three labelled categories.
    ///
    /// Fallback entries appear only when both engines return empty,
    /// which covers readers with no interests as well as readers whose
    /// interests match no peers and no books.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the catalogue backend.
    pub fn recommendations<S: CatalogStore + ?Sized>(
        &self,
        store: &S,
        user_id: u64,
        limit: usize,
    ) -> Result<RecommendationSet, StoreError> {
        let content_based = self.content.recommend(store, user_id, limit)?;
        let collaborative = self.collaborative.recommend(store, user_id, limit)?;
        let fallback = if content_based.is_empty() && collaborative.is_empty() {
            self.fallback_recommendations(store, user_id, limit)?
        } else {
            Vec::new()
        };

        info!(
            "generated recommendations for reader {user_id}: {} content-based, {} collaborative, {} fallback",
            content_based.len(),
            collaborative.len(),
            fallback.len()
        );

        Ok(RecommendationSet {
            content_based,
            collaborative,
            fallback,
        })
    }

    /// Cold-start recommendations from popular and recent books.
    ///
    /// Popular books carry a neutral score and a popularity reason
    /// (books with no ratings yet read "Recently added" instead); when
    /// the popular list falls short of `limit`, recent books top the
    /// list up, deduplicated by book id. Books the reader has rated are
    /// excluded throughout.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the catalogue backend.
    pub fn fallback_recommendations<S: CatalogStore + ?Sized>(
        &self,
        store: &S,
        user_id: u64,
        limit: usize,
    ) -> Result<Vec<Recommendation>, StoreError> {
        let rated = store.rated_book_ids(user_id)?;
        let mut recommendations = Vec::new();

        for popular in store.popular_books(limit)? {
            if rated.contains(&popular.book.id) {
                continue;
            }
            let reason = if popular.rating_count > 0 {
                "Popular among readers"
            } else {
                "Recently added"
            };
            recommendations.push(Recommendation::new(
                popular.book,
                POPULAR_FALLBACK_SCORE,
                RecommendationSource::Fallback,
                reason,
            ));
        }

        if recommendations.len() < limit {
            for book in store.recent_books(limit)? {
                if rated.contains(&book.id) {
                    continue;
                }
                if recommendations.iter().any(|r| r.book.id == book.id) {
                    continue;
                }
                recommendations.push(Recommendation::new(
                    book,
                    RECENT_FALLBACK_SCORE,
                    RecommendationSource::Fallback,
                    "Recently added",
                ));
            }
        }

        recommendations.truncate(limit);
        Ok(recommendations)
    }

    /// Books similar to a given book, by genre overlap.
    ///
    /// The source book itself is excluded; a missing book yields an
    /// empty list.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the catalogue backend.
    pub fn similar_books<S: CatalogStore + ?Sized>(
        &self,
        store: &S,
        book_id: u64,
        limit: usize,
    ) -> Result<Vec<Recommendation>, StoreError> {
        let Some(book) = store.book_by_id(book_id)? else {
            return Ok(Vec::new());
        };
        let exclude: HashSet<u64> = std::iter::once(book_id).collect();
        self.content
            .recommend_for_genres(store, &book.genres, &exclude, limit)
    }

    /// A single interleaved feed for the home page.
    ///
    /// Round-robins across content-based, collaborative, and fallback
    /// lists in that priority order, taking index 0 from each source,
    /// then index 1, and so on. Duplicate book ids are skipped; the walk
    /// stops at `limit` or after a full pass that appends nothing.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the catalogue backend.
    pub fn personalized_home_feed<S: CatalogStore + ?Sized>(
        &self,
        store: &S,
        user_id: u64,
        limit: usize,
    ) -> Result<Vec<Recommendation>, StoreError> {
        let sets = self.recommendations(store, user_id, limit)?;
        let sources = [&sets.content_based, &sets.collaborative, &sets.fallback];

        let mut feed: Vec<Recommendation> = Vec::new();
        let mut seen: HashSet<u64> = HashSet::new();
        let mut index = 0;

        while feed.len() < limit {
            let mut appended = false;
            for source in sources {
                if let Some(recommendation) = source.get(index) {
                    if seen.insert(recommendation.book.id) {
                        feed.push(recommendation.clone());
                        appended = true;
                    }
                }
            }
            if !appended {
                break;
            }
            index += 1;
        }

        feed.truncate(limit);
        Ok(feed)
    }

    /// Human-readable justification for recommending a book to a reader.
    ///
    /// Built independently of score computation from up to three checks:
    /// direct genre overlap, a high rating from one of the top five
    /// similar peers, and a high global average. Returns `None` when the
    /// reader or book does not exist, and a generic sentence when no
    /// check applies.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the catalogue backend.
    pub fn explain_recommendation<S: CatalogStore + ?Sized>(
        &self,
        store: &S,
        user_id: u64,
        book_id: u64,
    ) -> Result<Option<String>, StoreError> {
        let Some(reader) = store.user_by_id(user_id)? else {
            return Ok(None);
        };
        let Some(book) = store.book_by_id(book_id)? else {
            return Ok(None);
        };

        let mut clauses: Vec<String> = Vec::new();

        let interests = reader.normalized_interests();
        // Display casing comes from the book's genre list here.
        let common: Vec<&str> = book
            .genres
            .iter()
            .filter(|genre| interests.contains(&normalize_label(genre)))
            .map(String::as_str)
            .collect();
        if !common.is_empty() {
            clauses.push(format!(
                "This book matches your interest in {}",
                common.join(", ")
            ));
        }

        let peers = self.collaborative.similar_readers(store, user_id)?;
        for peer in peers.iter().take(TOP_PEERS_CONSIDERED) {
            if let Some(rating) = store.user_rating(peer.user_id, book_id)? {
                if rating.is_high() {
                    clauses.push(format!(
                        "Readers with similar taste rated this {}\u{2605}",
                        rating.value
                    ));
                    break;
                }
            }
        }

        if let Some(avg) = store.average_book_rating(book_id)? {
            if avg >= f32::from(HIGH_RATING_MIN) {
                clauses.push(format!(
                    "Highly rated by readers ({avg:.1}\u{2605} average)"
                ));
            }
        }

        if clauses.is_empty() {
            return Ok(Some(GENERIC_REASON.to_owned()));
        }
        Ok(Some(clauses.join(CLAUSE_SEPARATOR)))
    }

    /// Diagnostic counts for a reader's recommendation potential.
    ///
    /// Returns `None` when the reader does not exist.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the catalogue backend.
    pub fn recommendation_stats<S: CatalogStore + ?Sized>(
        &self,
        store: &S,
        user_id: u64,
    ) -> Result<Option<RecommendationStats>, StoreError> {
        let Some(reader) = store.user_by_id(user_id)? else {
            return Ok(None);
        };
        let peers = self.collaborative.similar_readers(store, user_id)?;
        let rated = store.rated_book_ids(user_id)?;
        let interest_count = reader.interests.len();

        Ok(Some(RecommendationStats {
            user_id,
            interest_count,
            books_rated: rated.len(),
            similar_reader_count: peers.len(),
            can_use_content_based: interest_count > 0,
            can_use_collaborative: !peers.is_empty(),
        }))
    }
}
