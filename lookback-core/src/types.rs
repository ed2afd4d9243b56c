//! Re-export of foundational types from `lookback-types`.
// Consolidated re-exports so downstream crates can depend on `lookback-core` only

pub use lookback_types::{AdapterKey, LookbackError};
pub use lookback_types::{DataKind, Market, Resolution, SecurityType, Symbol};
pub use lookback_types::{DispatchConfig, OutOfOrderPolicy};
pub use lookback_types::{SkipReason, SkippedRequest};

pub use chrono_tz::Tz;
pub use rust_decimal::Decimal;
