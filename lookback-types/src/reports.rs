//! Report envelopes describing how a dispatch run treated its requests.

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::market::{DataKind, Resolution, Symbol};

/// Why a request contributed no data to a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SkipReason {
    /// The requested range is empty or reversed (`end <= start`).
    DegenerateRange,
    /// The adapter does not serve this resolution for the security type.
    UnsupportedResolution,
    /// The adapter does not serve this data kind for the security type.
    UnsupportedDataKind,
}

impl SkipReason {
    /// Stable, kebab-case identifier for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DegenerateRange => "degenerate-range",
            Self::UnsupportedResolution => "unsupported-resolution",
            Self::UnsupportedDataKind => "unsupported-data-kind",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request that was accepted but served empty.
///
/// Skips are not errors: the run proceeds and the request simply
/// contributes zero slices and zero data points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRequest {
    /// Symbol of the skipped request.
    pub symbol: Symbol,
    /// Requested resolution.
    pub resolution: Resolution,
    /// Requested data kind.
    pub data_kind: DataKind,
    /// Why nothing was fetched.
    pub reason: SkipReason,
}
