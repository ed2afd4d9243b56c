use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::DateTime;
use chrono_tz::Tz;

use crate::Symbol;
use crate::data::{Bar, MarketData, Tick};

/// All data available at one instant, across every requested symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slice {
    time: DateTime<Tz>,
    bars: BTreeMap<Symbol, Bar>,
    ticks: BTreeMap<Symbol, Vec<Tick>>,
}

impl Slice {
    pub(crate) const fn new(time: DateTime<Tz>) -> Self {
        Self {
            time,
            bars: BTreeMap::new(),
            ticks: BTreeMap::new(),
        }
    }

    /// Instant of this slice, in the run's output zone.
    #[must_use]
    pub const fn time(&self) -> &DateTime<Tz> {
        &self.time
    }

    /// One bar per symbol.
    #[must_use]
    pub const fn bars(&self) -> &BTreeMap<Symbol, Bar> {
        &self.bars
    }

    /// Ticks per symbol, in arrival order.
    #[must_use]
    pub const fn ticks(&self) -> &BTreeMap<Symbol, Vec<Tick>> {
        &self.ticks
    }

    /// Bar for `symbol`, if present.
    #[must_use]
    pub fn bar(&self, symbol: &Symbol) -> Option<&Bar> {
        self.bars.get(symbol)
    }

    /// Ticks for `symbol`; empty if none.
    #[must_use]
    pub fn ticks_for(&self, symbol: &Symbol) -> &[Tick] {
        self.ticks.get(symbol).map_or(&[], Vec::as_slice)
    }

    /// Total number of bars and ticks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len() + self.ticks.values().map(Vec::len).sum::<usize>()
    }

    /// True if the slice carries no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add a point. Returns `false` when a bar for the same symbol is already
    /// present; the first bar wins.
    pub(crate) fn insert(&mut self, point: MarketData) -> bool {
        match point {
            MarketData::Bar(bar) => match self.bars.entry(bar.symbol.clone()) {
                Entry::Vacant(v) => {
                    v.insert(bar);
                    true
                }
                Entry::Occupied(_) => false,
            },
            MarketData::Tick(tick) => {
                self.ticks.entry(tick.symbol.clone()).or_default().push(tick);
                true
            }
        }
    }
}
