//! Declarative description of what an adapter can serve.

use std::collections::{BTreeSet, HashMap};

use chrono_tz::Tz;

use crate::{DataKind, Market, Resolution, SecurityType};

/// Immutable statement of an adapter's coverage.
///
/// A security type is serviced when it has an entry registered through
/// [`CapabilityBuilder::security_type`]. Within a serviced type, any
/// resolution or data kind not listed is served as "no data" rather than
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityDescriptor {
    markets: BTreeSet<Market>,
    resolutions: HashMap<SecurityType, BTreeSet<Resolution>>,
    data_kinds: HashMap<SecurityType, BTreeSet<DataKind>>,
    time_zone: Tz,
}

impl CapabilityDescriptor {
    /// Start describing an adapter whose data is expressed in `time_zone`.
    #[must_use]
    pub fn builder(time_zone: Tz) -> CapabilityBuilder {
        CapabilityBuilder {
            inner: Self {
                markets: BTreeSet::new(),
                resolutions: HashMap::new(),
                data_kinds: HashMap::new(),
                time_zone,
            },
        }
    }

    /// Markets this adapter claims.
    pub fn markets(&self) -> impl Iterator<Item = &Market> {
        self.markets.iter()
    }

    /// Whether this adapter claims `market`.
    #[must_use]
    pub fn serves_market(&self, market: &Market) -> bool {
        self.markets.contains(market)
    }

    /// Whether `kind` is serviced at all.
    #[must_use]
    pub fn services(&self, kind: SecurityType) -> bool {
        self.resolutions.contains_key(&kind) || self.data_kinds.contains_key(&kind)
    }

    /// Whether bars/ticks at `resolution` are available for `kind`.
    #[must_use]
    pub fn supports_resolution(&self, kind: SecurityType, resolution: Resolution) -> bool {
        self.resolutions
            .get(&kind)
            .is_some_and(|set| set.contains(&resolution))
    }

    /// Whether `data_kind` is available for `kind`.
    #[must_use]
    pub fn supports_data_kind(&self, kind: SecurityType, data_kind: DataKind) -> bool {
        self.data_kinds
            .get(&kind)
            .is_some_and(|set| set.contains(&data_kind))
    }

    /// Resolutions available for `kind`, finest first.
    pub fn resolutions(&self, kind: SecurityType) -> impl Iterator<Item = Resolution> + '_ {
        self.resolutions
            .get(&kind)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Zone in which the adapter expresses timestamps.
    #[must_use]
    pub const fn time_zone(&self) -> Tz {
        self.time_zone
    }
}

/// Builder for [`CapabilityDescriptor`].
#[derive(Debug, Clone)]
pub struct CapabilityBuilder {
    inner: CapabilityDescriptor,
}

impl CapabilityBuilder {
    /// Claim a market.
    #[must_use]
    pub fn market(mut self, market: Market) -> Self {
        self.inner.markets.insert(market);
        self
    }

    /// Service `kind` with the given resolutions and data kinds.
    ///
    /// Calling this with empty slices still marks the type as serviced; every
    /// request for it is then served empty.
    #[must_use]
    pub fn security_type(
        mut self,
        kind: SecurityType,
        resolutions: &[Resolution],
        data_kinds: &[DataKind],
    ) -> Self {
        self.inner
            .resolutions
            .entry(kind)
            .or_default()
            .extend(resolutions.iter().copied());
        self.inner
            .data_kinds
            .entry(kind)
            .or_default()
            .extend(data_kinds.iter().copied());
        self
    }

    /// Finish the descriptor.
    #[must_use]
    pub fn build(self) -> CapabilityDescriptor {
        self.inner
    }
}
