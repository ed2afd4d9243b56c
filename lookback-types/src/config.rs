//! Configuration types for the dispatch engine.

use serde::{Deserialize, Serialize};

/// What to do when an adapter yields a point older than its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutOfOrderPolicy {
    /// Terminate the run with a `Data` error at the offending point.
    #[default]
    Fail,
    /// Skip the offending point and keep merging.
    Drop,
}

/// Global configuration for the `Lookback` dispatch engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Drop adapter points whose end time falls outside the requested range.
    ///
    /// Adapters typically page by whole periods and may return a bar that
    /// straddles the range boundary.
    #[serde(default = "default_clip_to_range")]
    pub clip_to_range: bool,
    /// Handling of adapter streams that break the ascending-time contract.
    #[serde(default)]
    pub out_of_order: OutOfOrderPolicy,
}

const fn default_clip_to_range() -> bool {
    true
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            clip_to_range: default_clip_to_range(),
            out_of_order: OutOfOrderPolicy::default(),
        }
    }
}
