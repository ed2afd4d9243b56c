use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::market::SecurityType;

/// Unified error type for the lookback workspace.
///
/// Binding failures (`InvalidSymbol`, `UnsupportedSecurityType`) are raised
/// before any data flows. Adapter failures surface mid-stream at the point
/// where the adapter gave up.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LookbackError {
    /// The symbol cannot be resolved to a registered market, or the bound
    /// adapter does not list it.
    #[error("unknown symbol: {symbol} ({reason})")]
    InvalidSymbol {
        /// Ticker that failed to resolve.
        symbol: String,
        /// Short explanation, e.g. "no adapter for market 'oanda'".
        reason: String,
    },

    /// The bound adapter does not service the symbol's security type at all.
    #[error("invalid security type: {security_type} for {symbol} via {adapter}")]
    UnsupportedSecurityType {
        /// Ticker of the rejected request.
        symbol: String,
        /// Security type the adapter refused.
        security_type: SecurityType,
        /// Adapter the request was routed to.
        adapter: String,
    },

    /// An adapter fetch failed (transport, authentication, throttling).
    #[error("{adapter} failed: {msg}")]
    Adapter {
        /// Adapter name that failed.
        adapter: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Issues with the returned data (ordering contract broken, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument or configuration.
    #[error("invalid argument: {0}")]
    InvalidArg(String),
}

impl LookbackError {
    /// Helper: build an `InvalidSymbol` error.
    pub fn invalid_symbol(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSymbol {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }

    /// Helper: build an `UnsupportedSecurityType` error.
    pub fn unsupported_security_type(
        symbol: impl Into<String>,
        security_type: SecurityType,
        adapter: impl Into<String>,
    ) -> Self {
        Self::UnsupportedSecurityType {
            symbol: symbol.into(),
            security_type,
            adapter: adapter.into(),
        }
    }

    /// Helper: build an `Adapter` error with the adapter name and message.
    pub fn adapter(adapter: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Adapter {
            adapter: adapter.into(),
            msg: msg.into(),
        }
    }

    /// Returns true for errors raised while binding requests to adapters.
    ///
    /// These indicate caller mistakes and are never produced mid-stream.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidSymbol { .. } | Self::UnsupportedSecurityType { .. }
        )
    }
}
