use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use lookback::{
    HistoricalRequest, Lookback, LookbackError, Resolution, SecurityType, SkipReason, Symbol,
    TimeRange,
};
use lookback_mock::MockExchange;

use crate::helpers::{drain, strictly_increasing, total_points};

fn engine() -> Lookback {
    Lookback::builder()
        .default_adapter(Arc::new(MockExchange::binance()))
        .build()
        .unwrap()
}

fn last(span: TimeDelta) -> TimeRange {
    TimeRange::lookback(Utc::now(), span)
}

#[tokio::test]
async fn minute_bars_for_the_last_hour() {
    let eth = Symbol::new("ETHUSDT", SecurityType::Crypto, "binance").unwrap();
    let req = HistoricalRequest::new(eth.clone(), Resolution::Minute, last(TimeDelta::hours(1)));
    let stream = engine().run_history(&[req], chrono_tz::UTC).unwrap();
    assert!(stream.skipped().is_empty());

    let (slices, err, count) = drain(stream).await;
    assert!(err.is_none());
    assert!(!slices.is_empty());
    assert!(slices.len() <= 60);
    assert!(strictly_increasing(&slices));
    assert!(count > 0);
    assert_eq!(count, total_points(&slices));
    assert!(slices.iter().all(|s| s.bar(&eth).is_some()));
}

#[tokio::test]
async fn ticks_without_tick_capability_are_empty() {
    let eth = Symbol::new("ETHUSDT", SecurityType::Crypto, "binance").unwrap();
    let req = HistoricalRequest::new(eth, Resolution::Tick, last(TimeDelta::seconds(15)));
    let stream = engine().run_history(&[req], chrono_tz::UTC).unwrap();
    assert_eq!(stream.skipped().len(), 1);
    assert_eq!(stream.skipped()[0].reason, SkipReason::UnsupportedResolution);

    let (slices, err, count) = drain(stream).await;
    assert!(slices.is_empty());
    assert!(err.is_none());
    assert_eq!(count, 0);
}

#[tokio::test]
async fn second_bars_without_capability_are_empty() {
    let eth = Symbol::new("ETHUSDT", SecurityType::Crypto, "binance").unwrap();
    let req = HistoricalRequest::new(eth, Resolution::Second, last(TimeDelta::minutes(1)));
    let stream = engine().run_history(&[req], chrono_tz::UTC).unwrap();
    assert_eq!(stream.skipped().len(), 1);
    assert_eq!(stream.skipped()[0].resolution, Resolution::Second);
    assert_eq!(stream.skipped()[0].reason, SkipReason::UnsupportedResolution);

    let (slices, err, count) = drain(stream).await;
    assert!(slices.is_empty());
    assert!(err.is_none());
    assert_eq!(count, 0);
}

#[tokio::test]
async fn reversed_range_is_empty_not_an_error() {
    let eur = Symbol::new("EURUSD", SecurityType::Forex, "oanda").unwrap();
    let req = HistoricalRequest::new(eur, Resolution::Daily, last(TimeDelta::days(-15)));
    let stream = engine().run_history(&[req], chrono_tz::UTC).unwrap();
    assert_eq!(stream.skipped()[0].reason, SkipReason::DegenerateRange);

    let (slices, err, count) = drain(stream).await;
    assert!(slices.is_empty());
    assert!(err.is_none());
    assert_eq!(count, 0);
}

#[tokio::test]
async fn unknown_symbol_fails_the_run() {
    let xyz = Symbol::new("XYZ", SecurityType::Crypto, "binance").unwrap();
    let req = HistoricalRequest::new(xyz, Resolution::Daily, last(TimeDelta::days(15)));
    let err = engine().run_history(&[req], chrono_tz::UTC).unwrap_err();
    assert!(matches!(err, LookbackError::InvalidSymbol { .. }), "{err:?}");
}

#[tokio::test]
async fn equity_on_crypto_exchange_is_unsupported() {
    let aapl = Symbol::new("AAPL", SecurityType::Equity, "usa").unwrap();
    let req = HistoricalRequest::new(aapl, Resolution::Daily, last(TimeDelta::days(15)));
    let err = engine().run_history(&[req], chrono_tz::UTC).unwrap_err();
    match err {
        LookbackError::UnsupportedSecurityType {
            security_type,
            adapter,
            ..
        } => {
            assert_eq!(security_type, SecurityType::Equity);
            assert_eq!(adapter, "binance");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn identical_runs_are_identical() {
    let end = Utc::now();
    let reqs: Vec<_> = ["ETHUSDT", "BTCUSDT"]
        .iter()
        .map(|t| {
            let s = Symbol::new(t, SecurityType::Crypto, "binance").unwrap();
            HistoricalRequest::new(
                s,
                Resolution::Hour,
                TimeRange::lookback(end, TimeDelta::days(2)),
            )
        })
        .collect();
    let lb = engine();
    let (a, _, ca) = drain(lb.run_history(&reqs, chrono_tz::Europe::London).unwrap()).await;
    let (b, _, cb) = drain(lb.run_history(&reqs, chrono_tz::Europe::London).unwrap()).await;
    assert_eq!(a, b);
    assert_eq!(ca, cb);
    assert!(a.iter().all(|s| s.bars().len() == 2));
}
