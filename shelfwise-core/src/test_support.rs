//! Test-only, in-memory [`CatalogStore`] implementation used by unit and
//! integration tests across the workspace.

use std::collections::HashSet;

use crate::{Book, CatalogStore, PeerRating, PopularBook, Rating, Reader, StoreError};

/// In-memory [`CatalogStore`] backed by plain vectors.
///
/// Lookups are linear scans, so the store suits only the small fixtures
/// tests build. Books are considered "recent" in reverse insertion order,
/// and ratings upsert per `(user, book)` pair, mirroring the contracts of
/// a real backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: Vec<Reader>,
    books: Vec<Book>,
    ratings: Vec<Rating>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reader while returning `self` for chaining.
    #[must_use]
    pub fn with_reader(mut self, reader: Reader) -> Self {
        self.users.push(reader);
        self
    }

    /// Add a book while returning `self` for chaining.
    #[must_use]
    pub fn with_book(mut self, book: Book) -> Self {
        self.books.push(book);
        self
    }

    /// Record a rating while returning `self` for chaining.
    ///
    /// Replaces any previous rating by the same reader for the same book
    /// (latest write wins).
    #[must_use]
    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.add_rating(rating);
        self
    }

    /// Record a rating, replacing any previous one for the same pair.
    pub fn add_rating(&mut self, rating: Rating) {
        self.ratings
            .retain(|r| !(r.user_id == rating.user_id && r.book_id == rating.book_id));
        self.ratings.push(rating);
    }

    fn ratings_for_book(&self, book_id: u64) -> impl Iterator<Item = &Rating> {
        self.ratings.iter().filter(move |r| r.book_id == book_id)
    }

    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "the mean of a handful of star values stays well within f32"
    )]
    fn mean_rating(&self, book_id: u64) -> Option<f32> {
        let values: Vec<u8> = self.ratings_for_book(book_id).map(|r| r.value).collect();
        if values.is_empty() {
            return None;
        }
        let total: u32 = values.iter().copied().map(u32::from).sum();
        Some(total as f32 / values.len() as f32)
    }
}

impl CatalogStore for MemoryStore {
    fn user_by_id(&self, user_id: u64) -> Result<Option<Reader>, StoreError> {
        Ok(self.users.iter().find(|u| u.id == user_id).cloned())
    }

    fn all_users(&self) -> Result<Vec<Reader>, StoreError> {
        Ok(self.users.clone())
    }

    fn all_books(&self) -> Result<Vec<Book>, StoreError> {
        Ok(self.books.clone())
    }

    fn book_by_id(&self, book_id: u64) -> Result<Option<Book>, StoreError> {
        Ok(self.books.iter().find(|b| b.id == book_id).cloned())
    }

    fn rated_book_ids(&self, user_id: u64) -> Result<HashSet<u64>, StoreError> {
        Ok(self
            .ratings
            .iter()
            .filter(|r| r.user_id == user_id)
            .map(|r| r.book_id)
            .collect())
    }

    fn high_rated_books_by_users(
        &self,
        user_ids: &[u64],
        min_rating: u8,
    ) -> Result<Vec<PeerRating>, StoreError> {
        let ids: HashSet<u64> = user_ids.iter().copied().collect();
        let mut rows = Vec::new();
        for rating in &self.ratings {
            if !ids.contains(&rating.user_id) || rating.value < min_rating {
                continue;
            }
            if let Some(book) = self.books.iter().find(|b| b.id == rating.book_id) {
                rows.push(PeerRating {
                    book: book.clone(),
                    rater_id: rating.user_id,
                    rating: rating.value,
                });
            }
        }
        Ok(rows)
    }

    fn average_book_rating(&self, book_id: u64) -> Result<Option<f32>, StoreError> {
        Ok(self.mean_rating(book_id))
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "test fixtures never hold more than a few ratings per book"
    )]
    fn popular_books(&self, limit: usize) -> Result<Vec<PopularBook>, StoreError> {
        let mut ranked: Vec<PopularBook> = self
            .books
            .iter()
            .map(|book| PopularBook {
                book: book.clone(),
                rating_count: self.ratings_for_book(book.id).count() as u32,
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.rating_count
                .cmp(&a.rating_count)
                .then_with(|| {
                    let avg_a = self.mean_rating(a.book.id).unwrap_or(0.0);
                    let avg_b = self.mean_rating(b.book.id).unwrap_or(0.0);
                    avg_b.total_cmp(&avg_a)
                })
                .then_with(|| a.book.id.cmp(&b.book.id))
        });
        ranked.truncate(limit);
        Ok(ranked)
    }

    fn recent_books(&self, limit: usize) -> Result<Vec<Book>, StoreError> {
        Ok(self.books.iter().rev().take(limit).cloned().collect())
    }

    fn user_rating(&self, user_id: u64, book_id: u64) -> Result<Option<Rating>, StoreError> {
        Ok(self
            .ratings
            .iter()
            .find(|r| r.user_id == user_id && r.book_id == book_id)
            .copied())
    }
}
