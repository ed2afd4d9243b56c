//! Historical data requests.

use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;

use crate::{DataKind, Resolution, Symbol};

/// UTC time window `[start, end]`.
///
/// No ordering is enforced at construction: a reversed or empty window is a
/// valid value and simply covers no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeRange {
    /// Build a window from explicit bounds.
    #[must_use]
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Window of length `span` ending at `end`, i.e. `[end - span, end]`.
    ///
    /// A negative `span` yields a reversed (degenerate) window.
    #[must_use]
    pub fn lookback(end: DateTime<Utc>, span: TimeDelta) -> Self {
        Self {
            start: end - span,
            end,
        }
    }

    /// Inclusive start.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Inclusive end.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// True when the window covers no time (`end <= start`).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.end <= self.start
    }

    /// True if `ts` lies within `[start, end]`.
    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts <= self.end
    }
}

/// A typed request for historical data of one symbol.
///
/// Built once per query and consumed by a single dispatch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoricalRequest {
    symbol: Symbol,
    resolution: Resolution,
    range: TimeRange,
    data_kind: DataKind,
    output_zone: Option<Tz>,
}

impl HistoricalRequest {
    /// Request trade data for `symbol` at `resolution` over `range`.
    #[must_use]
    pub const fn new(symbol: Symbol, resolution: Resolution, range: TimeRange) -> Self {
        Self {
            symbol,
            resolution,
            range,
            data_kind: DataKind::Trade,
            output_zone: None,
        }
    }

    /// Replace the requested data kind.
    #[must_use]
    pub const fn with_data_kind(mut self, kind: DataKind) -> Self {
        self.data_kind = kind;
        self
    }

    /// Express the bars/ticks of this request in `zone` instead of the run zone.
    #[must_use]
    pub const fn with_output_zone(mut self, zone: Tz) -> Self {
        self.output_zone = Some(zone);
        self
    }

    /// Requested symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Requested resolution.
    #[must_use]
    pub const fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Requested UTC window.
    #[must_use]
    pub const fn range(&self) -> TimeRange {
        self.range
    }

    /// Requested data kind.
    #[must_use]
    pub const fn data_kind(&self) -> DataKind {
        self.data_kind
    }

    /// Zone override for data timestamps, if any.
    #[must_use]
    pub const fn output_zone(&self) -> Option<Tz> {
        self.output_zone
    }

    /// The adapter-facing view of this request.
    #[must_use]
    pub fn to_fetch(&self) -> FetchRequest {
        FetchRequest {
            symbol: self.symbol.clone(),
            resolution: self.resolution,
            range: self.range,
            data_kind: self.data_kind,
        }
    }
}

/// What an adapter is asked to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Symbol to fetch (security type via `symbol.security_type()`).
    pub symbol: Symbol,
    /// Bar size or tick.
    pub resolution: Resolution,
    /// UTC window.
    pub range: TimeRange,
    /// Trade, quote, etc.
    pub data_kind: DataKind,
}
