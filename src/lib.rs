//! Facade crate for the Shelfwise recommendation engine.
//!
//! Re-exports the domain types, both recommendation engines, and the
//! orchestration service so applications can depend on a single crate.

#![forbid(unsafe_code)]

pub use shelfwise_core::{
    Book, CatalogStore, HIGH_RATING_MIN, MAX_RATING, MIN_RATING, PeerRating, PopularBook, Rating,
    RatingError, Reader, Recommendation, RecommendationSource, SimilarReader, StoreError,
    similarity,
};

#[cfg(feature = "test-support")]
pub use shelfwise_core::test_support::MemoryStore;

pub use shelfwise_recommender::{
    CollaborativeRecommender, ContentRecommender, DEFAULT_RECOMMENDATION_COUNT,
    MIN_SIMILARITY_THRESHOLD, PeerFavourite,
};

pub use shelfwise_feed::{RecommendationService, RecommendationSet, RecommendationStats};
