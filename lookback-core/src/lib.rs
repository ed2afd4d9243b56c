//! lookback-core
//!
//! Core types, traits, and utilities shared across the lookback workspace.
//!
//! - `types`: identifiers, errors, and configuration re-exported from `lookback-types`.
//! - `request`: historical requests and time windows.
//! - `data`: bars and ticks.
//! - `capability`: the declarative coverage of an adapter.
//! - `adapter`: the `HistoryAdapter` trait implemented by exchange crates.
//! - `slice` / `timeseries`: slices and the lazy slice merger.
//! - `counter`: per-run data point tally.
//!
//! Async model
//! -----------
//! Adapters return `futures::Stream`s and the merger is itself a `Stream`.
//! Nothing here spawns tasks or depends on a specific runtime.
#![warn(missing_docs)]

/// The `HistoryAdapter` trait and its stream type.
pub mod adapter;
/// Adapter capability descriptors.
pub mod capability;
/// Per-run data point counter.
pub mod counter;
/// Bars, ticks and the `MarketData` union.
pub mod data;
/// Historical requests and time windows.
pub mod request;
/// Time-ordered slices of market data.
pub mod slice;
/// Time-series utilities for merging per-request streams.
pub mod timeseries;
pub mod types;

pub use adapter::{DataStream, HistoryAdapter};
pub use capability::{CapabilityBuilder, CapabilityDescriptor};
pub use counter::PointCounter;
pub use data::{Bar, MarketData, Tick};
pub use request::{FetchRequest, HistoricalRequest, TimeRange};
pub use slice::Slice;
pub use timeseries::merge::SliceMerger;
pub use types::*;
