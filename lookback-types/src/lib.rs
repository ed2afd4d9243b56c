//! Lookback-specific data transfer objects, errors, and configuration primitives.
#![warn(missing_docs)]

mod adapter;
mod config;
mod error;
mod market;
mod reports;

pub use adapter::AdapterKey;
pub use config::{DispatchConfig, OutOfOrderPolicy};
pub use error::LookbackError;
pub use market::{DataKind, Market, Resolution, SecurityType, Symbol};
pub use reports::{SkipReason, SkippedRequest};
