//! Collaborative filtering: peer discovery by interest overlap, then
//! similarity-weighted scoring of the books those peers rated highly.

use std::collections::{BTreeMap, HashMap};

use log::{debug, info};
use shelfwise_core::similarity::{jaccard, normalize_label, round3};
use shelfwise_core::{
    Book, CatalogStore, HIGH_RATING_MIN, MIN_RATING, Recommendation, RecommendationSource,
    SimilarReader, StoreError,
};

use crate::MIN_SIMILARITY_THRESHOLD;

/// Running per-book totals while folding peer ratings.
#[derive(Debug)]
struct Tally {
    book: Book,
    total: f32,
    ratings: Vec<u8>,
}

/// A book counted as popular among a reader's similar peers.
///
/// Produced by [`CollaborativeRecommender::popular_among_similar`]; ranked
/// by raw occurrence count rather than weighted score, so it serves as a
/// softer feed than the primary scoring path.
#[derive(Debug, Clone, PartialEq)]
pub struct PeerFavourite {
    /// The book itself.
    pub book: Book,
    /// How many similar peers rated the book (any star value).
    pub supporters: u32,
    /// Externally computed average rating, for display only.
    pub avg_rating: Option<f32>,
}

/// Scores unrated books by peer ratings weighted by peer similarity.
///
/// Peers are readers whose normalised interests overlap the target's by
/// at least the configured Jaccard threshold. Nothing is cached between
/// calls; peer sets and scores are recomputed per request.
#[derive(Debug, Clone, Copy)]
pub struct CollaborativeRecommender {
    min_similarity: f32,
}

impl Default for CollaborativeRecommender {
    fn default() -> Self {
        Self {
            min_similarity: MIN_SIMILARITY_THRESHOLD,
        }
    }
}

impl CollaborativeRecommender {
    /// Construct an engine with the default similarity threshold.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct an engine with a custom minimum peer similarity.
    #[must_use]
    pub const fn with_min_similarity(min_similarity: f32) -> Self {
        Self { min_similarity }
    }

    /// Find readers whose interests overlap the target reader's.
    ///
    /// Returns peers sorted by descending similarity (three-decimal
    /// rounding, ascending user id on ties). Shared interests are cased
    /// per the target reader's own interest list. A missing reader or an
    /// empty normalised interest set yields an empty peer list.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the catalogue backend.
    pub fn similar_readers<S: CatalogStore + ?Sized>(
        &self,
        store: &S,
        user_id: u64,
    ) -> Result<Vec<SimilarReader>, StoreError> {
        let Some(target) = store.user_by_id(user_id)? else {
            return Ok(Vec::new());
        };
        let target_interests = target.normalized_interests();
        if target_interests.is_empty() {
            debug!("reader {user_id} has no usable interests; no peer search");
            return Ok(Vec::new());
        }

        let mut peers = Vec::new();
        for other in store.all_users()? {
            if other.id == user_id {
                continue;
            }
            let other_interests = other.normalized_interests();
            if other_interests.is_empty() {
                continue;
            }
            let similarity = jaccard(&target_interests, &other_interests);
            if similarity < self.min_similarity {
                continue;
            }
            let shared_interests: Vec<String> = target
                .interests
                .iter()
                .filter(|label| other_interests.contains(&normalize_label(label)))
                .cloned()
                .collect();
            peers.push(SimilarReader {
                user_id: other.id,
                username: other.username,
                similarity: round3(similarity),
                shared_interests,
            });
        }

        peers.sort_by(|a, b| {
            b.similarity
                .total_cmp(&a.similarity)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        Ok(peers)
    }

    /// Recommend up to `limit` unrated books, ranked by a
    /// similarity-weighted peer-rating score.
    ///
    /// Each qualifying peer rating of at least four stars contributes
    /// `similarity * (rating / 5)` to its book's total; totals are
    /// normalised against the best case of every peer awarding five
    /// stars. No peers, or no qualifying peer ratings, yields an empty
    /// result rather than an error.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the catalogue backend.
    #[expect(
        clippy::float_arithmetic,
        reason = "weighted peer scoring is inherently floating point"
    )]
    pub fn recommend<S: CatalogStore + ?Sized>(
        &self,
        store: &S,
        user_id: u64,
        limit: usize,
    ) -> Result<Vec<Recommendation>, StoreError> {
        let peers = self.similar_readers(store, user_id)?;
        if peers.is_empty() {
            info!("no similar readers found for reader {user_id}");
            return Ok(Vec::new());
        }

        let rated = store.rated_book_ids(user_id)?;
        let peer_ids: Vec<u64> = peers.iter().map(|peer| peer.user_id).collect();
        let rows = store.high_rated_books_by_users(&peer_ids, HIGH_RATING_MIN)?;
        if rows.is_empty() {
            info!("no highly-rated peer books for reader {user_id}");
            return Ok(Vec::new());
        }

        let similarity_by_peer: HashMap<u64, f32> = peers
            .iter()
            .map(|peer| (peer.user_id, peer.similarity))
            .collect();

        // BTreeMap keeps accumulation order deterministic.
        let mut tallies: BTreeMap<u64, Tally> = BTreeMap::new();
        for row in rows {
            if rated.contains(&row.book.id) {
                continue;
            }
            let similarity = similarity_by_peer
                .get(&row.rater_id)
                .copied()
                .unwrap_or(0.0);
            let weighted = similarity * (f32::from(row.rating) / 5.0);
            let tally = tallies.entry(row.book.id).or_insert_with(|| Tally {
                book: row.book,
                total: 0.0,
                ratings: Vec::new(),
            });
            tally.total += weighted;
            tally.ratings.push(row.rating);
        }

        // Best case: every peer rated the book five stars.
        let max_possible: f32 = peers.iter().map(|peer| peer.similarity).sum();

        let mut recommendations = Vec::new();
        for tally in tallies.into_values() {
            // Unreachable once peers exist with similarity above a
            // positive threshold, but the guard stays explicit.
            let normalized = if max_possible > 0.0 {
                (tally.total / max_possible).min(1.0)
            } else {
                0.0
            };
            let reason = peer_reason(&tally.ratings);
            let avg_rating = store.average_book_rating(tally.book.id)?;
            recommendations.push(
                Recommendation::new(
                    tally.book,
                    round3(normalized),
                    RecommendationSource::Collaborative,
                    reason,
                )
                .with_avg_rating(avg_rating),
            );
        }

        crate::rank(&mut recommendations, limit);
        info!(
            "generated {} collaborative recommendations for reader {user_id}",
            recommendations.len()
        );
        Ok(recommendations)
    }

    /// Books popular among similar peers, counting ratings of any value.
    ///
    /// Ranked by raw occurrence count (ascending book id on ties) and
    /// excluding books the target reader has rated.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the catalogue backend.
    pub fn popular_among_similar<S: CatalogStore + ?Sized>(
        &self,
        store: &S,
        user_id: u64,
        limit: usize,
    ) -> Result<Vec<PeerFavourite>, StoreError> {
        let peers = self.similar_readers(store, user_id)?;
        if peers.is_empty() {
            return Ok(Vec::new());
        }

        let rated = store.rated_book_ids(user_id)?;
        let peer_ids: Vec<u64> = peers.iter().map(|peer| peer.user_id).collect();
        let rows = store.high_rated_books_by_users(&peer_ids, MIN_RATING)?;

        let mut counts: BTreeMap<u64, (Book, u32)> = BTreeMap::new();
        for row in rows {
            if rated.contains(&row.book.id) {
                continue;
            }
            let entry = counts.entry(row.book.id).or_insert((row.book, 0));
            entry.1 += 1;
        }

        let mut favourites: Vec<(Book, u32)> = counts.into_values().collect();
        favourites.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.id.cmp(&b.0.id)));
        favourites.truncate(limit);

        let mut result = Vec::with_capacity(favourites.len());
        for (book, supporters) in favourites {
            let avg_rating = store.average_book_rating(book.id)?;
            result.push(PeerFavourite {
                book,
                supporters,
                avg_rating,
            });
        }
        Ok(result)
    }
}

/// Phrase the contributor summary for a collaborative recommendation.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "the mean of a handful of star values stays well within f32"
)]
fn peer_reason(ratings: &[u8]) -> String {
    let count = ratings.len();
    if count == 0 {
        return "Recommended by readers with similar taste".to_owned();
    }
    let total: u32 = ratings.iter().copied().map(u32::from).sum();
    let mean = total as f32 / count as f32;
    if count == 1 {
        format!("Recommended by a reader with similar taste (rated {mean:.0}\u{2605})")
    } else {
        format!("Loved by {count} readers with similar taste (avg {mean:.1}\u{2605})")
    }
}
