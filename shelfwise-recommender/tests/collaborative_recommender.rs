#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]
#![expect(
    clippy::float_arithmetic,
    reason = "tests compare floating point scores"
)]

//! Integration coverage for the collaborative engine against the
//! in-memory catalogue store.

use rstest::rstest;
use shelfwise_core::test_support::MemoryStore;
use shelfwise_core::{Book, Rating, Reader, RecommendationSource};
use shelfwise_recommender::CollaborativeRecommender;

const TOLERANCE: f32 = 1e-6;

fn rating(user_id: u64, book_id: u64, value: u8) -> Rating {
    Rating::new(user_id, book_id, value).expect("valid rating fixture")
}

fn interests(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|label| (*label).to_owned()).collect()
}

/// Target reader 1 with one peer at similarity 0.5 who loved book 100.
fn half_similarity_store() -> MemoryStore {
    MemoryStore::new()
        .with_reader(Reader::new(1, "ada", interests(&["Fantasy", "Horror"])))
        .with_reader(Reader::new(
            2,
            "bo",
            interests(&["Fantasy", "Horror", "Science Fiction", "Drama"]),
        ))
        .with_book(Book::new(100, "Nightfall", "Anon", interests(&["Horror"])))
        .with_rating(rating(2, 100, 5))
}

#[rstest]
fn single_peer_full_marks_normalises_to_one() {
    let store = half_similarity_store();
    let recommendations = CollaborativeRecommender::new()
        .recommend(&store, 1, 10)
        .expect("store reads succeed");

    assert_eq!(recommendations.len(), 1);
    let top = &recommendations[0];
    assert_eq!(top.book.id, 100);
    assert!((top.score - 1.0).abs() <= TOLERANCE);
    assert_eq!(top.source, RecommendationSource::Collaborative);
    assert_eq!(
        top.reason,
        "Recommended by a reader with similar taste (rated 5★)"
    );
}

#[rstest]
fn two_peer_weighting_matches_the_worked_example() {
    // Peer 2 at similarity 3/5 = 0.6 rated book 100 four stars; peer 3 at
    // similarity 2/5 = 0.4 rated it five. Weighted total 0.6*0.8 + 0.4*1.0
    // = 0.88 against a best case of 1.0.
    let store = MemoryStore::new()
        .with_reader(Reader::new(1, "ada", interests(&["A", "B", "C"])))
        .with_reader(Reader::new(2, "bo", interests(&["A", "B", "C", "D", "E"])))
        .with_reader(Reader::new(3, "cy", interests(&["A", "B", "X", "Y"])))
        .with_book(Book::new(100, "Consensus", "Anon", interests(&["A"])))
        .with_rating(rating(2, 100, 4))
        .with_rating(rating(3, 100, 5));

    let recommendations = CollaborativeRecommender::new()
        .recommend(&store, 1, 10)
        .expect("store reads succeed");

    assert_eq!(recommendations.len(), 1);
    let top = &recommendations[0];
    assert!((top.score - 0.88).abs() <= TOLERANCE);
    assert_eq!(top.reason, "Loved by 2 readers with similar taste (avg 4.5★)");
}

#[rstest]
fn similar_readers_report_display_cased_overlap() {
    let store = half_similarity_store();
    let peers = CollaborativeRecommender::new()
        .similar_readers(&store, 1)
        .expect("store reads succeed");

    assert_eq!(peers.len(), 1);
    let peer = &peers[0];
    assert_eq!(peer.user_id, 2);
    assert_eq!(peer.username, "bo");
    assert!((peer.similarity - 0.5).abs() <= TOLERANCE);
    assert_eq!(peer.shared_interests, vec!["Fantasy", "Horror"]);
}

#[rstest]
fn peers_sort_by_similarity_with_id_tiebreak() {
    let store = MemoryStore::new()
        .with_reader(Reader::new(1, "ada", interests(&["A", "B"])))
        .with_reader(Reader::new(5, "dee", interests(&["A", "B"])))
        .with_reader(Reader::new(3, "cy", interests(&["A", "B"])))
        .with_reader(Reader::new(4, "elle", interests(&["A", "B", "C", "D"])));

    let peers = CollaborativeRecommender::new()
        .similar_readers(&store, 1)
        .expect("store reads succeed");

    let ids: Vec<u64> = peers.iter().map(|p| p.user_id).collect();
    assert_eq!(ids, vec![3, 5, 4], "full overlap first, ties by id");
}

#[rstest]
fn reader_without_interests_finds_no_peers() {
    let store = MemoryStore::new()
        .with_reader(Reader::new(1, "ada", Vec::new()))
        .with_reader(Reader::new(2, "bo", interests(&["Fantasy"])));

    let engine = CollaborativeRecommender::new();
    assert!(
        engine
            .similar_readers(&store, 1)
            .expect("store reads succeed")
            .is_empty()
    );
    assert!(
        engine
            .recommend(&store, 1, 10)
            .expect("store reads succeed")
            .is_empty()
    );
}

#[rstest]
fn dissimilar_readers_are_not_peers() {
    let store = MemoryStore::new()
        .with_reader(Reader::new(1, "ada", interests(&["Fantasy"])))
        .with_reader(Reader::new(2, "bo", interests(&["Business"])));

    let peers = CollaborativeRecommender::new()
        .similar_readers(&store, 1)
        .expect("store reads succeed");
    assert!(peers.is_empty());
}

#[rstest]
fn books_rated_by_the_target_are_excluded() {
    let store = half_similarity_store().with_rating(rating(1, 100, 3));
    let recommendations = CollaborativeRecommender::new()
        .recommend(&store, 1, 10)
        .expect("store reads succeed");
    assert!(recommendations.is_empty());
}

#[rstest]
fn middling_peer_ratings_do_not_qualify() {
    let store = MemoryStore::new()
        .with_reader(Reader::new(1, "ada", interests(&["Fantasy"])))
        .with_reader(Reader::new(2, "bo", interests(&["Fantasy"])))
        .with_book(Book::new(100, "Meh", "Anon", interests(&["Fantasy"])))
        .with_rating(rating(2, 100, 3));

    let recommendations = CollaborativeRecommender::new()
        .recommend(&store, 1, 10)
        .expect("store reads succeed");
    assert!(recommendations.is_empty());
}

#[rstest]
fn results_are_sorted_and_limited() {
    let store = MemoryStore::new()
        .with_reader(Reader::new(1, "ada", interests(&["Fantasy"])))
        .with_reader(Reader::new(2, "bo", interests(&["Fantasy"])))
        .with_book(Book::new(100, "First", "Anon", interests(&["Fantasy"])))
        .with_book(Book::new(101, "Second", "Anon", interests(&["Fantasy"])))
        .with_rating(rating(2, 100, 5))
        .with_rating(rating(2, 101, 4));

    let engine = CollaborativeRecommender::new();
    let all = engine.recommend(&store, 1, 10).expect("store reads succeed");
    assert_eq!(all.len(), 2);
    assert!(all[0].score >= all[1].score);

    let limited = engine.recommend(&store, 1, 1).expect("store reads succeed");
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].book.id, 100);
}

#[rstest]
fn peer_favourites_count_any_rating_value() {
    let store = MemoryStore::new()
        .with_reader(Reader::new(1, "ada", interests(&["Fantasy"])))
        .with_reader(Reader::new(2, "bo", interests(&["Fantasy"])))
        .with_reader(Reader::new(3, "cy", interests(&["Fantasy"])))
        .with_book(Book::new(100, "Crowd", "Anon", interests(&["Fantasy"])))
        .with_book(Book::new(101, "Quiet", "Anon", interests(&["Fantasy"])))
        .with_rating(rating(2, 100, 2))
        .with_rating(rating(3, 100, 3))
        .with_rating(rating(2, 101, 5));

    let favourites = CollaborativeRecommender::new()
        .popular_among_similar(&store, 1, 10)
        .expect("store reads succeed");

    assert_eq!(favourites.len(), 2);
    assert_eq!(favourites[0].book.id, 100);
    assert_eq!(favourites[0].supporters, 2);
    assert_eq!(favourites[1].supporters, 1);
}

#[rstest]
fn peer_favourites_exclude_rated_books() {
    let store = half_similarity_store().with_rating(rating(1, 100, 2));
    let favourites = CollaborativeRecommender::new()
        .popular_among_similar(&store, 1, 10)
        .expect("store reads succeed");
    assert!(favourites.is_empty());
}
