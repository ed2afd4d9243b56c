//! Bars and ticks produced by adapters.

use chrono::{DateTime, TimeDelta};
use chrono_tz::Tz;
use rust_decimal::Decimal;

use crate::{DataKind, Symbol};

/// OHLCV bar covering `[time, time + period)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    /// Symbol the bar belongs to.
    pub symbol: Symbol,
    /// Bar open time.
    pub time: DateTime<Tz>,
    /// Bar length.
    pub period: TimeDelta,
    /// Open price.
    pub open: Decimal,
    /// High price.
    pub high: Decimal,
    /// Low price.
    pub low: Decimal,
    /// Close price.
    pub close: Decimal,
    /// Traded volume over the bar.
    pub volume: Decimal,
}

impl Bar {
    /// Time at which the bar closes and becomes available.
    #[must_use]
    pub fn end_time(&self) -> DateTime<Tz> {
        self.time + self.period
    }
}

/// A single trade or quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    /// Symbol the tick belongs to.
    pub symbol: Symbol,
    /// Event time.
    pub time: DateTime<Tz>,
    /// Whether this is a trade or a quote tick.
    pub kind: DataKind,
    /// Last/trade price (mid for quote ticks).
    pub price: Decimal,
    /// Trade size; zero for quote ticks.
    pub quantity: Decimal,
    /// Best bid, for quote ticks.
    pub bid: Option<Decimal>,
    /// Best ask, for quote ticks.
    pub ask: Option<Decimal>,
}

/// One data point yielded by an adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarketData {
    /// Aggregated bar.
    Bar(Bar),
    /// Raw tick.
    Tick(Tick),
}

impl MarketData {
    /// Symbol of the underlying bar or tick.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        match self {
            Self::Bar(b) => &b.symbol,
            Self::Tick(t) => &t.symbol,
        }
    }

    /// Start time of the bar, or the tick time.
    #[must_use]
    pub const fn time(&self) -> &DateTime<Tz> {
        match self {
            Self::Bar(b) => &b.time,
            Self::Tick(t) => &t.time,
        }
    }

    /// Time the point becomes available: bar close, or the tick time.
    ///
    /// Slices are keyed by this instant.
    #[must_use]
    pub fn end_time(&self) -> DateTime<Tz> {
        match self {
            Self::Bar(b) => b.end_time(),
            Self::Tick(t) => t.time,
        }
    }

    /// Re-express all timestamps in `zone`. The instants are unchanged.
    #[must_use]
    pub fn with_timezone(self, zone: &Tz) -> Self {
        match self {
            Self::Bar(mut b) => {
                b.time = b.time.with_timezone(zone);
                Self::Bar(b)
            }
            Self::Tick(mut t) => {
                t.time = t.time.with_timezone(zone);
                Self::Tick(t)
            }
        }
    }
}

impl From<Bar> for MarketData {
    fn from(b: Bar) -> Self {
        Self::Bar(b)
    }
}

impl From<Tick> for MarketData {
    fn from(t: Tick) -> Self {
        Self::Tick(t)
    }
}
