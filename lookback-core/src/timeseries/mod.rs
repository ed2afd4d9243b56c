//! Time-series utilities shared by adapters and the dispatch engine.
//!
//! - `merge`: lazy k-way merge of per-request streams into time-ordered slices
/// Slice merging for joining multiple per-request streams.
pub mod merge;
