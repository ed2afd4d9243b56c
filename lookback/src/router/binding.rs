use core::fmt;
use std::sync::Arc;

use lookback_core::{HistoricalRequest, HistoryAdapter, LookbackError, SkipReason};

use crate::Lookback;

/// Outcome of binding one request to the adapter registry.
#[derive(Clone)]
pub enum Binding {
    /// Fetch from this adapter.
    Fetch(Arc<dyn HistoryAdapter>),
    /// Valid request that is served empty.
    Skip(SkipReason),
}

impl Binding {
    /// Name of the bound adapter, if any.
    #[must_use]
    pub fn adapter_name(&self) -> Option<&'static str> {
        match self {
            Self::Fetch(a) => Some(a.name()),
            Self::Skip(_) => None,
        }
    }

    /// The skip reason, if the request is served empty.
    #[must_use]
    pub const fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Fetch(_) => None,
            Self::Skip(r) => Some(*r),
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(a) => f.debug_tuple("Fetch").field(&a.name()).finish(),
            Self::Skip(r) => f.debug_tuple("Skip").field(r).finish(),
        }
    }
}

impl Lookback {
    /// Resolve the adapter for `req` without fetching anything.
    ///
    /// Checks, in order:
    /// - a degenerate range (`end <= start`) is served empty before any lookup;
    /// - the symbol's market must be claimed by an adapter (or a default
    ///   adapter must exist), else `InvalidSymbol`;
    /// - the adapter must service the security type, else
    ///   `UnsupportedSecurityType`;
    /// - the adapter must know the ticker, else `InvalidSymbol`;
    /// - an unsupported resolution or data kind is served empty.
    ///
    /// # Errors
    /// Returns `InvalidSymbol` or `UnsupportedSecurityType` as described above.
    pub fn bind(&self, req: &HistoricalRequest) -> Result<Binding, LookbackError> {
        if req.range().is_degenerate() {
            return Ok(Binding::Skip(SkipReason::DegenerateRange));
        }

        let symbol = req.symbol();
        let adapter = self.route(symbol.market()).ok_or_else(|| {
            LookbackError::invalid_symbol(
                symbol.ticker(),
                format!("no adapter registered for market {}", symbol.market()),
            )
        })?;

        let caps = adapter.describe_capabilities();
        let kind = symbol.security_type();
        if !caps.services(kind) {
            return Err(LookbackError::unsupported_security_type(
                symbol.ticker(),
                kind,
                adapter.name(),
            ));
        }
        if !adapter.knows_symbol(symbol) {
            return Err(LookbackError::invalid_symbol(
                symbol.ticker(),
                format!("not listed by {} on market {}", adapter.name(), symbol.market()),
            ));
        }

        if !caps.supports_resolution(kind, req.resolution()) {
            return Ok(Binding::Skip(SkipReason::UnsupportedResolution));
        }
        if !caps.supports_data_kind(kind, req.data_kind()) {
            return Ok(Binding::Skip(SkipReason::UnsupportedDataKind));
        }
        Ok(Binding::Fetch(Arc::clone(adapter)))
    }
}
