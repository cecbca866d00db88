//! Recommendation engines for the Shelfwise catalogue.
//!
//! Two complementary engines are provided:
//! - [`ContentRecommender`] scores unrated books against a reader's
//!   declared genre interests using Jaccard overlap.
//! - [`CollaborativeRecommender`] finds peers by interest overlap, then
//!   scores unrated books by peer ratings weighted by peer similarity.
//!
//! Both engines are stateless between calls: every invocation re-reads
//! through the [`CatalogStore`](shelfwise_core::CatalogStore) and
//! recomputes from scratch, so concurrent requests for different readers
//! share nothing and need no locking. Absent readers, interests, or peers
//! produce empty results rather than errors; the orchestrating layer
//! interprets those as cold-start signals.

#![forbid(unsafe_code)]

use shelfwise_core::Recommendation;

mod collaborative;
mod content;

pub use collaborative::{CollaborativeRecommender, PeerFavourite};
pub use content::ContentRecommender;

/// Minimum Jaccard similarity for a genre match or a peer to qualify.
pub const MIN_SIMILARITY_THRESHOLD: f32 = 0.1;

/// Default number of recommendations returned per category.
pub const DEFAULT_RECOMMENDATION_COUNT: usize = 10;

/// Order recommendations by descending score and truncate to `limit`.
///
/// Ties break on ascending book id so equal-score results are
/// deterministic regardless of catalogue enumeration order.
pub(crate) fn rank(recommendations: &mut Vec<Recommendation>, limit: usize) {
    recommendations.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.book.id.cmp(&b.book.id))
    });
    recommendations.truncate(limit);
}
