mod common;

use chrono::{TimeDelta, Utc};
use futures::StreamExt;
use lookback::{HistoricalRequest, Resolution, SecurityType, Symbol, TimeRange};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Build an engine over the mock crypto and forex exchanges.
    let engine = common::mock_engine();

    // 2. Ask for the last hour of minute bars on two crypto pairs.
    let range = TimeRange::lookback(Utc::now(), TimeDelta::hours(1));
    let eth = Symbol::new("ETHUSDT", SecurityType::Crypto, "binance")?;
    let btc = Symbol::new("BTCUSDT", SecurityType::Crypto, "binance")?;
    let requests = [
        HistoricalRequest::new(eth.clone(), Resolution::Minute, range),
        HistoricalRequest::new(btc.clone(), Resolution::Minute, range),
    ];

    // 3. Consume the merged slices, expressed in New York time.
    let mut slices = engine.run_history(&requests, chrono_tz::America::New_York)?;
    let mut shown = 0;
    while let Some(slice) = slices.next().await {
        let slice = slice?;
        if shown < 5 {
            let close = |s: &Symbol| slice.bar(s).map(|b| b.close.to_string());
            println!(
                " - {}: ETHUSDT {:?}, BTCUSDT {:?}",
                slice.time(),
                close(&eth),
                close(&btc)
            );
            shown += 1;
        }
    }

    // 4. The counter covers every bar placed into a slice.
    println!("\n{} data points", slices.data_point_count());
    Ok(())
}
