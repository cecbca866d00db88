//! Orchestration layer for Shelfwise recommendations.
//!
//! [`RecommendationService`] composes the content-based and collaborative
//! engines, supplies a cold-start fallback built from popular and recent
//! books, interleaves the three sources into a deduplicated home feed,
//! and produces human-readable explanations and diagnostics. Every
//! operation is a pure read against the
//! [`CatalogStore`](shelfwise_core::CatalogStore); nothing is persisted.

#![forbid(unsafe_code)]

mod service;

pub use service::{RecommendationService, RecommendationSet, RecommendationStats};
