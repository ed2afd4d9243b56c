// Re-export helpers so tests can `use helpers::*;`
#![allow(dead_code)]

pub use mock_adapter::ScriptedAdapter;

use chrono::{DateTime, TimeDelta, Utc};
use lookback_core::{
    Bar, DataKind, HistoricalRequest, MarketData, Resolution, SecurityType, Symbol, Tick,
    TimeRange,
};
use rust_decimal::Decimal;

// ---------- Lightweight fixtures and helpers for tests ----------

pub const BINANCE: &str = "binance";
pub const OANDA: &str = "oanda";
pub const USA: &str = "usa";

/// Construct a UTC `DateTime` from components for readability in tests.
pub fn dt(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> DateTime<Utc> {
    let date = chrono::NaiveDate::from_ymd_opt(y, m, d).expect("invalid date");
    let naive = date
        .and_hms_opt(hh, mm, ss)
        .expect("invalid time components");
    DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc)
}

/// `2024-01-01 00:00:00 UTC` plus `minutes`.
pub fn at(minutes: i64) -> DateTime<Utc> {
    dt(2024, 1, 1, 0, 0, 0) + TimeDelta::minutes(minutes)
}

/// The first hour of 2024.
pub fn first_hour() -> TimeRange {
    TimeRange::new(at(0), at(60))
}

pub fn crypto(ticker: &str) -> Symbol {
    Symbol::new(ticker, SecurityType::Crypto, BINANCE).unwrap()
}

pub fn forex(ticker: &str) -> Symbol {
    Symbol::new(ticker, SecurityType::Forex, OANDA).unwrap()
}

pub fn equity(ticker: &str) -> Symbol {
    Symbol::new(ticker, SecurityType::Equity, USA).unwrap()
}

pub fn minute_req(symbol: Symbol) -> HistoricalRequest {
    HistoricalRequest::new(symbol, Resolution::Minute, first_hour())
}

pub fn tick_req(symbol: Symbol) -> HistoricalRequest {
    HistoricalRequest::new(symbol, Resolution::Tick, first_hour())
}

/// One-minute bar opening `minute` minutes into 2024 with `close` (in cents).
pub fn bar(symbol: &Symbol, minute: i64, close: i64) -> MarketData {
    let c = Decimal::new(close, 2);
    MarketData::Bar(Bar {
        symbol: symbol.clone(),
        time: at(minute).with_timezone(&chrono_tz::UTC),
        period: TimeDelta::minutes(1),
        open: c,
        high: c,
        low: c,
        close: c,
        volume: Decimal::ONE,
    })
}

/// Minute bars opening at each of `minutes`, closes equal to the minute.
pub fn bars(symbol: &Symbol, minutes: &[i64]) -> Vec<MarketData> {
    minutes.iter().map(|&m| bar(symbol, m, 100 + m)).collect()
}

/// Trade tick at `second` seconds into 2024 priced at `price` cents.
pub fn tick(symbol: &Symbol, second: i64, price: i64) -> MarketData {
    MarketData::Tick(Tick {
        symbol: symbol.clone(),
        time: (at(0) + TimeDelta::seconds(second)).with_timezone(&chrono_tz::UTC),
        kind: DataKind::Trade,
        price: Decimal::new(price, 2),
        quantity: Decimal::ONE,
        bid: None,
        ask: None,
    })
}

/// Consume a run to the end; returns the slices, the error (if any) and the final count.
pub async fn drain(
    mut stream: lookback::HistoryStream,
) -> (Vec<lookback::Slice>, Option<lookback::LookbackError>, u64) {
    use futures::StreamExt;
    let mut slices = Vec::new();
    let mut error = None;
    while let Some(item) = stream.next().await {
        match item {
            Ok(slice) => slices.push(slice),
            Err(e) => error = Some(e),
        }
    }
    let count = stream.data_point_count();
    (slices, error, count)
}

/// Sum of bars and ticks across `slices`.
pub fn total_points(slices: &[lookback::Slice]) -> u64 {
    slices.iter().map(|s| s.len() as u64).sum()
}

/// True if slice times strictly increase.
pub fn strictly_increasing(slices: &[lookback::Slice]) -> bool {
    slices.windows(2).all(|w| w[0].time() < w[1].time())
}
