//! Core domain types for the Shelfwise recommendation engine.
//!
//! This crate defines the data model shared by the content-based and
//! collaborative engines: readers with genre interests, books, validated
//! ratings, derived recommendation records, and the set-similarity
//! primitives both engines score with. Persistent storage is reached
//! through the read-only [`CatalogStore`] trait; implementations live
//! outside this workspace, apart from the in-memory store provided for
//! tests behind the `test-support` feature.

#![forbid(unsafe_code)]

pub mod book;
pub mod rating;
pub mod reader;
pub mod recommendation;
pub mod similarity;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use book::Book;
pub use rating::{HIGH_RATING_MIN, MAX_RATING, MIN_RATING, Rating, RatingError};
pub use reader::{Reader, SimilarReader};
pub use recommendation::{Recommendation, RecommendationSource};
pub use store::{CatalogStore, PeerRating, PopularBook, StoreError};

#[cfg(any(test, feature = "test-support"))]
pub use test_support::MemoryStore;
