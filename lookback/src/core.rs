use std::collections::HashMap;
use std::sync::Arc;

use lookback_core::{DispatchConfig, HistoryAdapter, LookbackError, Market, OutOfOrderPolicy};

/// Dispatch engine holding an immutable registry of history adapters.
///
/// Cheap to share behind an `Arc`; every call to
/// [`run_history`](Lookback::run_history) owns its own merger and counter, so
/// concurrent runs never interfere.
pub struct Lookback {
    pub(crate) adapters: Vec<Arc<dyn HistoryAdapter>>,
    pub(crate) by_market: HashMap<Market, Arc<dyn HistoryAdapter>>,
    pub(crate) fallback: Option<Arc<dyn HistoryAdapter>>,
    pub(crate) cfg: DispatchConfig,
}

/// Builder for constructing a [`Lookback`] engine.
pub struct LookbackBuilder {
    adapters: Vec<Arc<dyn HistoryAdapter>>,
    fallback: Option<Arc<dyn HistoryAdapter>>,
    cfg: DispatchConfig,
}

impl Default for LookbackBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LookbackBuilder {
    /// Create a builder with no adapters and the default [`DispatchConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            adapters: vec![],
            fallback: None,
            cfg: DispatchConfig::default(),
        }
    }

    /// Register an adapter for every market its capability descriptor claims.
    ///
    /// A market may be claimed by only one adapter; [`build`](Self::build)
    /// rejects overlapping claims.
    #[must_use]
    pub fn with_adapter(mut self, adapter: Arc<dyn HistoryAdapter>) -> Self {
        self.adapters.push(adapter);
        self
    }

    /// Register `adapter` and route every market without an explicit claim to it.
    ///
    /// Suits single-brokerage setups where one adapter serves all symbols.
    /// The adapter's own market claims are registered as with
    /// [`with_adapter`](Self::with_adapter).
    #[must_use]
    pub fn default_adapter(mut self, adapter: Arc<dyn HistoryAdapter>) -> Self {
        self.fallback = Some(adapter);
        self
    }

    /// Replace the whole dispatch configuration.
    #[must_use]
    pub const fn config(mut self, cfg: DispatchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Drop adapter points whose end time falls outside the requested range.
    #[must_use]
    pub const fn clip_to_range(mut self, yes: bool) -> Self {
        self.cfg.clip_to_range = yes;
        self
    }

    /// Select how adapter streams that go backwards in time are handled.
    #[must_use]
    pub const fn out_of_order(mut self, policy: OutOfOrderPolicy) -> Self {
        self.cfg.out_of_order = policy;
        self
    }

    /// Build the engine.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no adapter was registered, or if two different
    /// adapters claim the same market.
    pub fn build(self) -> Result<Lookback, LookbackError> {
        let mut adapters = self.adapters;
        if let Some(fallback) = &self.fallback
            && !adapters.iter().any(|a| same_adapter(a, fallback))
        {
            adapters.push(Arc::clone(fallback));
        }

        if adapters.is_empty() {
            return Err(LookbackError::InvalidArg(
                "no adapters registered; add at least one via with_adapter(...)".to_string(),
            ));
        }

        let mut by_market: HashMap<Market, Arc<dyn HistoryAdapter>> = HashMap::new();
        let mut unique: Vec<Arc<dyn HistoryAdapter>> = Vec::with_capacity(adapters.len());
        for adapter in adapters {
            if unique.iter().any(|a| same_adapter(a, &adapter)) {
                continue;
            }
            for market in adapter.describe_capabilities().markets() {
                if let Some(prev) = by_market.get(market) {
                    return Err(LookbackError::InvalidArg(format!(
                        "market {market} is claimed by both {} and {}",
                        prev.name(),
                        adapter.name()
                    )));
                }
                by_market.insert(market.clone(), Arc::clone(&adapter));
            }
            unique.push(adapter);
        }

        Ok(Lookback {
            adapters: unique,
            by_market,
            fallback: self.fallback,
            cfg: self.cfg,
        })
    }
}

fn same_adapter(a: &Arc<dyn HistoryAdapter>, b: &Arc<dyn HistoryAdapter>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

impl Lookback {
    /// Start building a new `Lookback` engine.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use lookback::{Lookback, OutOfOrderPolicy};
    /// use lookback_mock::MockExchange;
    ///
    /// let engine = Lookback::builder()
    ///     .with_adapter(Arc::new(MockExchange::binance()))
    ///     .with_adapter(Arc::new(MockExchange::oanda()))
    ///     .out_of_order(OutOfOrderPolicy::Drop)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> LookbackBuilder {
        LookbackBuilder::new()
    }

    /// Registered adapters, in registration order.
    #[must_use]
    pub fn adapters(&self) -> &[Arc<dyn HistoryAdapter>] {
        &self.adapters
    }

    /// Dispatch configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &DispatchConfig {
        &self.cfg
    }

    /// The adapter responsible for `market`, falling back to the default adapter.
    pub(crate) fn route(&self, market: &Market) -> Option<&Arc<dyn HistoryAdapter>> {
        self.by_market.get(market).or(self.fallback.as_ref())
    }
}
