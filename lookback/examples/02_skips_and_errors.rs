mod common;

use chrono::{TimeDelta, Utc};
use futures::StreamExt;
use lookback::{HistoricalRequest, LookbackError, Resolution, SecurityType, Symbol, TimeRange};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let engine = common::mock_engine();
    let now = Utc::now();

    let eth = Symbol::new("ETHUSDT", SecurityType::Crypto, "binance")?;
    let eur = Symbol::new("EURUSD", SecurityType::Forex, "oanda")?;

    // Valid requests that are served empty are reported, not rejected.
    let requests = [
        HistoricalRequest::new(
            eth.clone(),
            Resolution::Tick,
            TimeRange::lookback(now, TimeDelta::seconds(15)),
        ),
        HistoricalRequest::new(
            eur.clone(),
            Resolution::Daily,
            TimeRange::lookback(now, TimeDelta::days(-15)),
        ),
        HistoricalRequest::new(
            eur,
            Resolution::Daily,
            TimeRange::lookback(now, TimeDelta::days(15)),
        ),
    ];
    let mut run = engine.run_history(&requests, chrono_tz::UTC)?;
    for skip in run.skipped() {
        println!("skipped {} {}: {}", skip.symbol, skip.resolution, skip.reason);
    }
    let mut slices = 0;
    while let Some(slice) = run.next().await {
        slice?;
        slices += 1;
    }
    println!("{slices} daily slices, {} data points", run.data_point_count());

    // Unknown symbols and unserviced security types fail before anything is fetched.
    let xyz = Symbol::new("XYZ", SecurityType::Crypto, "binance")?;
    let aapl = Symbol::new("AAPL", SecurityType::Equity, "binance")?;
    for symbol in [xyz, aapl] {
        let req = HistoricalRequest::new(
            symbol,
            Resolution::Daily,
            TimeRange::lookback(now, TimeDelta::days(15)),
        );
        match engine.run_history(&[req], chrono_tz::UTC) {
            Err(
                e @ (LookbackError::InvalidSymbol { .. }
                | LookbackError::UnsupportedSecurityType { .. }),
            ) => {
                println!("rejected: {e}");
            }
            Err(e) => return Err(e.into()),
            Ok(_) => println!("unexpectedly accepted"),
        }
    }
    Ok(())
}
