//! Readers and their declared genre interests.

use std::collections::BTreeSet;

use crate::similarity::normalize_genres;

/// A reader with a declared interest profile.
///
/// Interests keep their registration casing for display; comparisons go
/// through [`Reader::normalized_interests`]. An empty interest list is
/// valid and routes the reader onto the cold-start fallback path rather
/// than raising an error.
///
/// # Examples
/// ```
/// use shelfwise_core::Reader;
///
/// let reader = Reader::new(1, "ada", vec!["Science Fiction".into(), "Fantasy".into()]);
/// assert!(reader.normalized_interests().contains("fantasy"));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reader {
    /// Unique identifier.
    pub id: u64,
    /// Display name, used in peer-similarity explanations.
    pub username: String,
    /// Genre interest labels in registration casing; may be empty.
    pub interests: Vec<String>,
}

impl Reader {
    /// Construct a reader profile.
    #[must_use]
    pub fn new(id: u64, username: impl Into<String>, interests: Vec<String>) -> Self {
        Self {
            id,
            username: username.into(),
            interests,
        }
    }

    /// The reader's interests as a canonical lowercase set.
    #[must_use]
    pub fn normalized_interests(&self) -> BTreeSet<String> {
        normalize_genres(&self.interests)
    }
}

/// A peer ranked by interest overlap with a target reader.
///
/// Derived per request and never persisted. `similarity` is a Jaccard
/// score rounded to three decimals; `shared_interests` carries the
/// overlap cased per the target reader's own interest list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimilarReader {
    /// Identifier of the similar reader.
    pub user_id: u64,
    /// Display name of the similar reader.
    pub username: String,
    /// Jaccard similarity in `[0, 1]`, rounded to three decimals.
    pub similarity: f32,
    /// Interests common to both readers, display-cased.
    pub shared_interests: Vec<String>,
}
