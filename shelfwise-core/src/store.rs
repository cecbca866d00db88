//! Read-only data access for readers, books, and ratings.
//!
//! The [`CatalogStore`] trait is the engine's only window onto persistent
//! state. Every recommendation request re-reads through it and recomputes
//! from scratch; nothing is cached and nothing is written back. Absent
//! users, interests, peers, or books are ordinary empty results — the only
//! failure class is a backend read failure, surfaced as [`StoreError`] and
//! propagated untouched to the caller.

use std::collections::HashSet;

use thiserror::Error;

use crate::{Book, Rating, Reader};

/// Failure raised by a [`CatalogStore`] backend.
///
/// Wraps the backend's own error together with the name of the operation
/// that failed. The engine never catches or retries these; retry and
/// backoff policy belongs to the caller.
#[derive(Debug, Error)]
#[error("catalog store failed during {operation}")]
pub struct StoreError {
    operation: &'static str,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl StoreError {
    /// Wrap a backend failure, tagging the operation that raised it.
    #[must_use]
    pub fn new(
        operation: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            operation,
            source: source.into(),
        }
    }

    /// Name of the store operation that failed.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        self.operation
    }
}

/// One peer rating joined with its book, as returned by
/// [`CatalogStore::high_rated_books_by_users`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeerRating {
    /// The rated book.
    pub book: Book,
    /// Reader who submitted the rating.
    pub rater_id: u64,
    /// Stars awarded, in `1..=5`.
    pub rating: u8,
}

/// A book joined with its rating count, as returned by
/// [`CatalogStore::popular_books`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopularBook {
    /// The book itself.
    pub book: Book,
    /// Number of ratings recorded for the book; may be zero.
    pub rating_count: u32,
}

/// Read-only access to the reader and book catalogue.
///
/// Implementations must support concurrent reads; the engines hold no
/// mutable state and may be called from parallel request tasks. Ranking
/// contracts: [`popular_books`](Self::popular_books) orders by rating
/// count then average rating, and [`recent_books`](Self::recent_books)
/// orders newest first.
///
/// # Examples
/// ```
/// use std::collections::HashSet;
/// use shelfwise_core::{
///     Book, CatalogStore, PeerRating, PopularBook, Rating, Reader, StoreError,
/// };
///
/// /// A catalogue with no content; every lookup comes back empty.
/// struct EmptyShelf;
///
/// impl CatalogStore for EmptyShelf {
///     fn user_by_id(&self, _user_id: u64) -> Result<Option<Reader>, StoreError> {
///         Ok(None)
///     }
///     fn all_users(&self) -> Result<Vec<Reader>, StoreError> {
///         Ok(Vec::new())
///     }
///     fn all_books(&self) -> Result<Vec<Book>, StoreError> {
///         Ok(Vec::new())
///     }
///     fn book_by_id(&self, _book_id: u64) -> Result<Option<Book>, StoreError> {
///         Ok(None)
///     }
///     fn rated_book_ids(&self, _user_id: u64) -> Result<HashSet<u64>, StoreError> {
///         Ok(HashSet::new())
///     }
///     fn high_rated_books_by_users(
///         &self,
///         _user_ids: &[u64],
///         _min_rating: u8,
///     ) -> Result<Vec<PeerRating>, StoreError> {
///         Ok(Vec::new())
///     }
///     fn average_book_rating(&self, _book_id: u64) -> Result<Option<f32>, StoreError> {
///         Ok(None)
///     }
///     fn popular_books(&self, _limit: usize) -> Result<Vec<PopularBook>, StoreError> {
///         Ok(Vec::new())
///     }
///     fn recent_books(&self, _limit: usize) -> Result<Vec<Book>, StoreError> {
///         Ok(Vec::new())
///     }
///     fn user_rating(&self, _user_id: u64, _book_id: u64) -> Result<Option<Rating>, StoreError> {
///         Ok(None)
///     }
/// }
///
/// # fn main() -> Result<(), StoreError> {
/// let store = EmptyShelf;
/// assert!(store.all_books()?.is_empty());
/// # Ok(())
/// # }
/// ```
pub trait CatalogStore: Send + Sync {
    /// Fetch a reader profile, with interests, by identifier.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backend read fails.
    fn user_by_id(&self, user_id: u64) -> Result<Option<Reader>, StoreError>;

    /// Fetch every reader profile; only ids and interests are consumed.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backend read fails.
    fn all_users(&self) -> Result<Vec<Reader>, StoreError>;

    /// Fetch the full book catalogue.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backend read fails.
    fn all_books(&self) -> Result<Vec<Book>, StoreError>;

    /// Fetch a single book by identifier.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backend read fails.
    fn book_by_id(&self, book_id: u64) -> Result<Option<Book>, StoreError>;

    /// Identifiers of every book the reader has rated.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backend read fails.
    fn rated_book_ids(&self, user_id: u64) -> Result<HashSet<u64>, StoreError>;

    /// Ratings of at least `min_rating` stars submitted by any of
    /// `user_ids`, joined with their books.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backend read fails.
    fn high_rated_books_by_users(
        &self,
        user_ids: &[u64],
        min_rating: u8,
    ) -> Result<Vec<PeerRating>, StoreError>;

    /// Mean star rating for a book, or `None` when it has no ratings.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backend read fails.
    fn average_book_rating(&self, book_id: u64) -> Result<Option<f32>, StoreError>;

    /// Up to `limit` books ranked by rating count, then average rating.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backend read fails.
    fn popular_books(&self, limit: usize) -> Result<Vec<PopularBook>, StoreError>;

    /// Up to `limit` most recently added books, newest first.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backend read fails.
    fn recent_books(&self, limit: usize) -> Result<Vec<Book>, StoreError>;

    /// One reader's rating of one book, if present.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backend read fails.
    fn user_rating(&self, user_id: u64, book_id: u64) -> Result<Option<Rating>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_reports_operation() {
        let error = StoreError::new("all_books", "connection reset");
        assert_eq!(error.operation(), "all_books");
        assert!(error.to_string().contains("all_books"));
    }
}
