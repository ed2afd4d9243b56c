use std::sync::Arc;

use lookback::Lookback;
use lookback_mock::MockExchange;

/// Engine with the mock `binance` (crypto) and `oanda` (forex) exchanges.
///
/// # Panics
/// Never in practice: the two mocks claim different markets.
#[must_use]
pub fn mock_engine() -> Lookback {
    Lookback::builder()
        .with_adapter(Arc::new(MockExchange::binance()))
        .with_adapter(Arc::new(MockExchange::oanda()))
        .build()
        .expect("mock exchanges claim distinct markets")
}
