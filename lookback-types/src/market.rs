//! Market identifiers, security types, resolutions, and symbols.
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::error::LookbackError;

/// Venue identifier that scopes a ticker (e.g. `binance`, `oanda`, `usa`).
///
/// Stored lower-case so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Market(String);

impl Market {
    /// Build a market identifier.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the name is empty or contains whitespace.
    pub fn new(name: impl AsRef<str>) -> Result<Self, LookbackError> {
        let name = name.as_ref().trim();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(LookbackError::InvalidArg(format!(
                "invalid market name: '{name}'"
            )));
        }
        Ok(Self(name.to_ascii_lowercase()))
    }

    /// Binance spot exchange.
    #[must_use]
    pub fn binance() -> Self {
        Self("binance".to_string())
    }

    /// Oanda forex/CFD venue.
    #[must_use]
    pub fn oanda() -> Self {
        Self("oanda".to_string())
    }

    /// US equity markets.
    #[must_use]
    pub fn usa() -> Self {
        Self("usa".to_string())
    }

    /// Returns the canonical (lower-case) market name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Broad asset class of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SecurityType {
    /// Listed equities.
    Equity,
    /// Spot foreign exchange pairs.
    Forex,
    /// Crypto spot pairs.
    Crypto,
    /// Futures contracts.
    Future,
    /// Options contracts.
    Option,
    /// Contracts for difference.
    Cfd,
    /// Indices.
    Index,
}

impl SecurityType {
    /// Stable, lower-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equity => "equity",
            Self::Forex => "forex",
            Self::Crypto => "crypto",
            Self::Future => "future",
            Self::Option => "option",
            Self::Cfd => "cfd",
            Self::Index => "index",
        }
    }
}

impl fmt::Display for SecurityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sampling granularity of historical data.
///
/// Variants are declared from finest to coarsest so the derived `Ord`
/// follows granularity (`Tick < Second < ... < Daily`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Resolution {
    /// Individual trades or quotes.
    Tick,
    /// One-second bars.
    Second,
    /// One-minute bars.
    Minute,
    /// One-hour bars.
    Hour,
    /// One-day bars.
    Daily,
}

impl Resolution {
    /// All resolutions from finest to coarsest.
    pub const ALL: [Self; 5] = [
        Self::Tick,
        Self::Second,
        Self::Minute,
        Self::Hour,
        Self::Daily,
    ];

    /// Length of one bar in seconds; `None` for tick data.
    #[must_use]
    pub const fn seconds(self) -> Option<i64> {
        match self {
            Self::Tick => None,
            Self::Second => Some(1),
            Self::Minute => Some(60),
            Self::Hour => Some(3_600),
            Self::Daily => Some(86_400),
        }
    }

    /// Stable, lower-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tick => "tick",
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Daily => "daily",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of data requested for a symbol.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[non_exhaustive]
pub enum DataKind {
    /// Executed trades (trade bars or trade ticks).
    #[default]
    Trade,
    /// Bid/ask quotes.
    Quote,
    /// Open interest snapshots.
    OpenInterest,
}

impl DataKind {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trade => "trade",
            Self::Quote => "quote",
            Self::OpenInterest => "open-interest",
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticker scoped to a security type and market, e.g. `ETHUSDT` crypto on `binance`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol {
    ticker: String,
    security_type: SecurityType,
    market: Market,
}

impl Symbol {
    /// Build a symbol. The ticker is upper-cased.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the ticker is empty or the market name is invalid.
    pub fn new(
        ticker: impl AsRef<str>,
        security_type: SecurityType,
        market: impl AsRef<str>,
    ) -> Result<Self, LookbackError> {
        let ticker = ticker.as_ref().trim();
        if ticker.is_empty() {
            return Err(LookbackError::InvalidArg("empty ticker".to_string()));
        }
        Ok(Self {
            ticker: ticker.to_ascii_uppercase(),
            security_type,
            market: Market::new(market)?,
        })
    }

    /// Upper-case ticker.
    #[must_use]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Security type the ticker belongs to.
    #[must_use]
    pub const fn security_type(&self) -> SecurityType {
        self.security_type
    }

    /// Market the ticker is listed on.
    #[must_use]
    pub const fn market(&self) -> &Market {
        &self.market
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ticker)
    }
}
