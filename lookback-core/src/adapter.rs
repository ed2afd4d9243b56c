use futures::stream::BoxStream;

use crate::capability::CapabilityDescriptor;
use crate::data::MarketData;
use crate::request::FetchRequest;
use crate::{AdapterKey, LookbackError, Symbol};

/// Lazy, ascending sequence of data points returned by an adapter.
///
/// Nothing is fetched until the stream is polled; dropping it abandons any
/// outstanding work.
pub type DataStream = BoxStream<'static, Result<MarketData, LookbackError>>;

/// Main adapter trait implemented by exchange/brokerage crates.
///
/// The dispatch engine only ever reads from an adapter: it queries the
/// capability descriptor during binding and asks for one stream per request.
pub trait HistoryAdapter: Send + Sync {
    /// A stable identifier for registry entries and error tagging (e.g. "binance").
    fn name(&self) -> &'static str;

    /// Canonical adapter key constructed from the static name.
    fn key(&self) -> AdapterKey {
        AdapterKey::new(self.name())
    }

    /// Markets, security types, resolutions and data kinds this adapter serves.
    fn describe_capabilities(&self) -> &CapabilityDescriptor;

    /// Whether the adapter recognises `symbol` on its market.
    ///
    /// Default: every ticker is accepted. Adapters backed by a symbol map
    /// should override this so unknown tickers fail binding.
    fn knows_symbol(&self, symbol: &Symbol) -> bool {
        let _ = symbol;
        true
    }

    /// Produce the history for `req`, ascending by time.
    ///
    /// Only called for requests that passed binding with a supported
    /// resolution and data kind. Points are expressed in the zone declared by
    /// [`CapabilityDescriptor::time_zone`]. Transport failures are yielded as
    /// `LookbackError::Adapter` items.
    fn fetch_history(&self, req: &FetchRequest) -> DataStream;
}
