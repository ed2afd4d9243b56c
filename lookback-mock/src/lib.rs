//! lookback-mock
//!
//! Exchange-like adapter for CI-safe tests and examples. History is generated
//! on the fly from a seed derived from the ticker and timestamp, so the same
//! window always yields the same bars and ticks.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono_tz::Tz;
use futures::StreamExt;
use futures::stream;
use lookback_core::{
    CapabilityBuilder, CapabilityDescriptor, DataKind, DataStream, FetchRequest, HistoryAdapter,
    LookbackError, Market, MarketData, Resolution, SecurityType, Symbol,
};

mod fixtures;

/// Tickers listed by [`MockExchange::binance`].
pub const BINANCE_TICKERS: &[&str] = &["ETHUSDT", "BTCUSDT", "BNBUSDT", "SOLUSDT", "ETHBTC"];

/// Deterministic mock exchange.
pub struct MockExchange {
    name: &'static str,
    caps: CapabilityDescriptor,
    tickers: Option<BTreeSet<String>>,
    latency: Option<Duration>,
    ticks_per_second: u64,
    fail_after: HashMap<String, usize>,
    served: Arc<AtomicU64>,
}

impl MockExchange {
    /// Start configuring an exchange named `name` whose data is expressed in `zone`.
    #[must_use]
    pub fn builder(name: &'static str, zone: Tz) -> MockExchangeBuilder {
        MockExchangeBuilder {
            name,
            caps: CapabilityDescriptor::builder(zone),
            tickers: None,
            latency: None,
            ticks_per_second: 1,
            fail_after: HashMap::new(),
        }
    }

    /// A crypto-only exchange on the `binance` market.
    ///
    /// Serves minute, hour and daily trade bars in UTC for [`BINANCE_TICKERS`].
    /// Ticks and quotes are not available.
    #[must_use]
    pub fn binance() -> Self {
        Self::builder("binance", chrono_tz::UTC)
            .market(Market::binance())
            .security_type(
                SecurityType::Crypto,
                &[Resolution::Minute, Resolution::Hour, Resolution::Daily],
                &[DataKind::Trade],
            )
            .tickers(BINANCE_TICKERS)
            .build()
    }

    /// A forex venue on the `oanda` market with ticks, quotes and bars.
    #[must_use]
    pub fn oanda() -> Self {
        Self::builder("oanda", chrono_tz::America::New_York)
            .market(Market::oanda())
            .security_type(
                SecurityType::Forex,
                &Resolution::ALL,
                &[DataKind::Trade, DataKind::Quote],
            )
            .tickers(&["EURUSD", "GBPUSD", "USDJPY"])
            .build()
    }

    /// Data points handed out so far across every fetch.
    #[must_use]
    pub fn points_served(&self) -> u64 {
        self.served.load(Ordering::Relaxed)
    }
}

impl HistoryAdapter for MockExchange {
    fn name(&self) -> &'static str {
        self.name
    }

    fn describe_capabilities(&self) -> &CapabilityDescriptor {
        &self.caps
    }

    fn knows_symbol(&self, symbol: &Symbol) -> bool {
        self.tickers
            .as_ref()
            .is_none_or(|set| set.contains(symbol.ticker()))
    }

    fn fetch_history(&self, req: &FetchRequest) -> DataStream {
        let points = fixtures::generate(req, self.caps.time_zone(), self.ticks_per_second);
        let items: Box<dyn Iterator<Item = Result<MarketData, LookbackError>> + Send> =
            match self.fail_after.get(req.symbol.ticker()) {
                Some(&n) => {
                    let err = LookbackError::adapter(
                        self.name,
                        format!("forced failure for {} after {n} points", req.symbol),
                    );
                    Box::new(points.take(n).map(Ok).chain(std::iter::once(Err(err))))
                }
                None => Box::new(points.map(Ok)),
            };

        let served = Arc::clone(&self.served);
        let latency = self.latency;
        stream::iter(items)
            .then(move |item| {
                let served = Arc::clone(&served);
                async move {
                    if let Some(delay) = latency {
                        tokio::time::sleep(delay).await;
                    }
                    if item.is_ok() {
                        served.fetch_add(1, Ordering::Relaxed);
                    }
                    item
                }
            })
            .boxed()
    }
}

/// Builder for [`MockExchange`].
pub struct MockExchangeBuilder {
    name: &'static str,
    caps: CapabilityBuilder,
    tickers: Option<BTreeSet<String>>,
    latency: Option<Duration>,
    ticks_per_second: u64,
    fail_after: HashMap<String, usize>,
}

impl MockExchangeBuilder {
    /// Claim a market.
    #[must_use]
    pub fn market(mut self, market: Market) -> Self {
        self.caps = self.caps.market(market);
        self
    }

    /// Service `kind` with the listed resolutions and data kinds.
    #[must_use]
    pub fn security_type(
        mut self,
        kind: SecurityType,
        resolutions: &[Resolution],
        data_kinds: &[DataKind],
    ) -> Self {
        self.caps = self.caps.security_type(kind, resolutions, data_kinds);
        self
    }

    /// Restrict known symbols to `tickers`. Without this every ticker is known.
    #[must_use]
    pub fn tickers(mut self, tickers: &[&str]) -> Self {
        self.tickers
            .get_or_insert_with(BTreeSet::new)
            .extend(tickers.iter().map(|t| t.to_ascii_uppercase()));
        self
    }

    /// Delay each point by `delay` (tokio timer).
    #[must_use]
    pub const fn latency(mut self, delay: Duration) -> Self {
        self.latency = Some(delay);
        self
    }

    /// Number of ticks sharing each whole second.
    #[must_use]
    pub const fn ticks_per_second(mut self, n: u64) -> Self {
        self.ticks_per_second = n;
        self
    }

    /// Yield an adapter error for `ticker` after `n` good points.
    #[must_use]
    pub fn fail_after(mut self, ticker: &str, n: usize) -> Self {
        self.fail_after.insert(ticker.to_ascii_uppercase(), n);
        self
    }

    /// Finish the exchange.
    #[must_use]
    pub fn build(self) -> MockExchange {
        MockExchange {
            name: self.name,
            caps: self.caps.build(),
            tickers: self.tickers,
            latency: self.latency,
            ticks_per_second: self.ticks_per_second,
            fail_after: self.fail_after,
            served: Arc::new(AtomicU64::new(0)),
        }
    }
}
