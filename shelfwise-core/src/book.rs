//! Books and their genre metadata.

use std::collections::BTreeSet;

use crate::similarity::normalize_genres;

/// A book in the catalogue.
///
/// Genres keep the casing supplied by the catalogue; comparisons go
/// through [`Book::normalized_genres`]. Aggregate rating statistics are
/// computed by the storage collaborator and fetched separately, so the
/// record itself stays immutable per request.
///
/// # Examples
/// ```
/// use shelfwise_core::Book;
///
/// let book = Book::new(1, "Dune", "Frank Herbert", vec!["Science Fiction".into()])
///     .with_description("Desert politics and giant worms.");
/// assert_eq!(book.id, 1);
/// assert!(book.normalized_genres().contains("science fiction"));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Book {
    /// Unique identifier.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Display author name.
    pub author: String,
    /// Genre labels in catalogue casing.
    pub genres: Vec<String>,
    /// Free-text description; may be empty.
    pub description: String,
}

impl Book {
    /// Construct a book with an empty description.
    #[must_use]
    pub fn new(
        id: u64,
        title: impl Into<String>,
        author: impl Into<String>,
        genres: Vec<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            genres,
            description: String::new(),
        }
    }

    /// Attach a description while returning `self` for chaining.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The book's genres as a canonical lowercase set.
    #[must_use]
    pub fn normalized_genres(&self) -> BTreeSet<String> {
        normalize_genres(&self.genres)
    }
}
