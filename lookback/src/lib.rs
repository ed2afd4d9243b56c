//! Lookback dispatches historical market-data requests to exchange adapters
//! and merges the results into a single time-ordered stream of slices.
//!
//! Overview
//! - Adapters implement the `lookback_core::HistoryAdapter` contract and
//!   declare their coverage with a `CapabilityDescriptor`.
//! - Each market is served by exactly one adapter; an optional default adapter
//!   receives every market without an explicit claim.
//! - A run binds all requests up front, then lazily merges the per-request
//!   streams into [`Slice`]s keyed by the instant each point becomes available.
//!
//! Key behaviors
//! - Binding: unknown markets and symbols fail with `InvalidSymbol`, a security
//!   type the adapter does not service fails with `UnsupportedSecurityType`.
//!   Degenerate ranges and unsupported resolutions/data kinds are served empty
//!   and reported through [`HistoryStream::skipped`].
//! - Merging: slices are strictly increasing in time; every point sharing an
//!   instant lands in the same slice. Bars for the same symbol at the same
//!   instant keep the first request's bar.
//! - Counting: [`HistoryStream::data_point_count`] tracks points placed into
//!   slices and can be read from another task via [`HistoryStream::counter`].
//! - Errors from an adapter stream are yielded once and end the run.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use chrono::{TimeDelta, Utc};
//! use futures::StreamExt;
//! use lookback::{HistoricalRequest, Lookback, Resolution, SecurityType, Symbol, TimeRange};
//! use lookback_mock::MockExchange;
//!
//! let engine = Lookback::builder()
//!     .with_adapter(Arc::new(MockExchange::binance()))
//!     .build()?;
//!
//! let eth = Symbol::new("ETHUSDT", SecurityType::Crypto, "binance")?;
//! let req = HistoricalRequest::new(
//!     eth,
//!     Resolution::Minute,
//!     TimeRange::lookback(Utc::now(), TimeDelta::hours(1)),
//! );
//!
//! let mut slices = engine.run_history(&[req], chrono_tz::UTC)?;
//! while let Some(slice) = slices.next().await {
//!     let slice = slice?;
//!     println!("{} -> {} points", slice.time(), slice.len());
//! }
//! println!("total: {}", slices.data_point_count());
//! ```
//!
//! See `lookback/examples/` for runnable demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use core::{Lookback, LookbackBuilder};
pub use router::binding::Binding;
pub use router::history::HistoryStream;

// Re-export core types for convenience
pub use lookback_core::{
    AdapterKey,
    Bar,
    CapabilityBuilder,
    CapabilityDescriptor,
    DataKind,
    DataStream,
    Decimal,
    DispatchConfig,
    FetchRequest,
    HistoricalRequest,
    HistoryAdapter,
    LookbackError,
    Market,
    MarketData,
    OutOfOrderPolicy,
    PointCounter,
    Resolution,
    SecurityType,
    SkipReason,
    SkippedRequest,
    Slice,
    Symbol,
    Tick,
    TimeRange,
    Tz,
};
