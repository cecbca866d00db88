//! Set-similarity primitives used by both recommendation engines.
//!
//! All functions are pure and deterministic: results depend only on the
//! (set-normalised) inputs, never on input ordering. Genre labels compare
//! case-insensitively and whitespace-trimmed; callers retain the original
//! casing for display.

use std::collections::BTreeSet;

/// Jaccard similarity coefficient between two sets.
///
/// Defined as `|A ∩ B| / |A ∪ B|`. Returns `0.0` when the union is empty
/// (including when both sets are empty) rather than dividing by zero.
///
/// # Examples
/// ```
/// use std::collections::BTreeSet;
/// use shelfwise_core::similarity::jaccard;
///
/// let a: BTreeSet<_> = ["a", "b", "c"].into_iter().collect();
/// let b: BTreeSet<_> = ["b", "c", "d"].into_iter().collect();
/// assert_eq!(jaccard(&a, &b), 0.5);
///
/// let empty = BTreeSet::<&str>::new();
/// assert_eq!(jaccard(&empty, &empty), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "the coefficient is a ratio of bounded set cardinalities"
)]
pub fn jaccard<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f32 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    intersection as f32 / union as f32
}

/// Canonical form of a single genre label: trimmed and lowercased.
///
/// # Examples
/// ```
/// use shelfwise_core::similarity::normalize_label;
///
/// assert_eq!(normalize_label("  Science Fiction "), "science fiction");
/// ```
#[must_use]
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Normalise a collection of genre labels into a canonical set.
///
/// Labels are trimmed and lowercased; entries that are empty after
/// trimming are dropped. The operation is idempotent and strips any
/// ordering or duplication from the input.
///
/// # Examples
/// ```
/// use shelfwise_core::similarity::normalize_genres;
///
/// let set = normalize_genres(["Fantasy", " fantasy ", "", "Horror"]);
/// assert_eq!(set.len(), 2);
/// assert!(set.contains("fantasy"));
/// assert!(set.contains("horror"));
/// ```
#[must_use]
pub fn normalize_genres<I, S>(labels: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    labels
        .into_iter()
        .map(|label| normalize_label(label.as_ref()))
        .filter(|label| !label.is_empty())
        .collect()
}

/// Genre overlap between two label lists.
///
/// Both inputs are normalised before delegating to [`jaccard`], so the
/// result is symmetric and insensitive to casing, whitespace, ordering,
/// and duplicates.
///
/// # Examples
/// ```
/// use shelfwise_core::similarity::genre_overlap;
///
/// let interests = vec!["Science Fiction".to_owned(), "Fantasy".to_owned()];
/// let genres = vec!["science fiction".to_owned(), "Adventure".to_owned()];
/// let score = genre_overlap(&interests, &genres);
/// assert!((score - 1.0 / 3.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn genre_overlap(a: &[String], b: &[String]) -> f32 {
    jaccard(&normalize_genres(a), &normalize_genres(b))
}

/// Round a score to three decimal places for display and comparison.
///
/// # Examples
/// ```
/// use shelfwise_core::similarity::round3;
///
/// assert_eq!(round3(1.0 / 3.0), 0.333);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "rounding scales by a fixed power of ten"
)]
pub fn round3(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}
