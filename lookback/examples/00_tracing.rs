mod common;

use chrono::{TimeDelta, Utc};
use futures::StreamExt;
use lookback::{HistoricalRequest, Resolution, SecurityType, Symbol, TimeRange};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize a human-friendly tracing subscriber with env-based filtering.
    // Suggested: RUST_LOG=info,lookback=debug,lookback_core=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let engine = common::mock_engine();
    let range = TimeRange::lookback(Utc::now(), TimeDelta::hours(2));

    let eth = Symbol::new("ETHUSDT", SecurityType::Crypto, "binance")?;
    let eur = Symbol::new("EURUSD", SecurityType::Forex, "oanda")?;
    let requests = [
        HistoricalRequest::new(eth.clone(), Resolution::Hour, range),
        // no tick data on the crypto mock: logged and skipped
        HistoricalRequest::new(eth, Resolution::Tick, range),
        HistoricalRequest::new(eur, Resolution::Minute, range),
    ];

    let mut slices = engine.run_history(&requests, chrono_tz::UTC)?;
    while let Some(slice) = slices.next().await {
        let _ = slice?;
    }
    Ok(())
}
