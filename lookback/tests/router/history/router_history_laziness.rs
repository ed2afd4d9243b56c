use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use lookback::{HistoricalRequest, Lookback, Resolution, SecurityType, TimeRange};
use lookback_mock::MockExchange;

use crate::helpers::{ScriptedAdapter, bars, crypto, drain, dt, minute_req, total_points};

#[tokio::test]
async fn nothing_is_pulled_until_polled() {
    let eth = crypto("ETHUSDT");
    let ex = ScriptedAdapter::builder()
        .market("binance")
        .serves(SecurityType::Crypto)
        .with_series("ETHUSDT", bars(&eth, &(0..50).collect::<Vec<_>>()))
        .build();
    let lb = Lookback::builder().with_adapter(ex.clone()).build().unwrap();

    let mut stream = lb.run_history(&[minute_req(eth)], chrono_tz::UTC).unwrap();
    assert_eq!(ex.fetches(), 1);
    assert_eq!(ex.pulled(), 0);

    let first = stream.next().await.unwrap().unwrap();
    assert_eq!(first.len(), 1);
    // one point for the slice, one to see that the slice is complete
    assert_eq!(ex.pulled(), 2);
    assert_eq!(stream.data_point_count(), 1);

    drop(stream);
    assert_eq!(ex.pulled(), 2);
}

#[tokio::test]
async fn counter_handle_is_readable_from_another_task() {
    let eth = crypto("ETHUSDT");
    let btc = crypto("BTCUSDT");
    let ex = ScriptedAdapter::builder()
        .market("binance")
        .serves(SecurityType::Crypto)
        .with_series("ETHUSDT", bars(&eth, &[0, 1, 2, 3]))
        .with_series("BTCUSDT", bars(&btc, &[1, 3, 5]))
        .build();
    let lb = Lookback::builder().with_adapter(ex).build().unwrap();
    let stream = lb
        .run_history(&[minute_req(eth), minute_req(btc)], chrono_tz::UTC)
        .unwrap();
    let counter = stream.counter();
    assert_eq!(counter.read(), 0);

    let (slices, err, count) = tokio::spawn(drain(stream)).await.unwrap();
    assert!(err.is_none());
    assert_eq!(counter.read(), 7);
    assert_eq!(count, total_points(&slices));
}

#[tokio::test(start_paused = true)]
async fn dropping_the_stream_stops_a_slow_adapter() {
    let slow = MockExchange::builder("slow", chrono_tz::UTC)
        .market(lookback::Market::binance())
        .security_type(SecurityType::Crypto, &[Resolution::Minute], &[lookback::DataKind::Trade])
        .latency(Duration::from_millis(100))
        .build();
    let slow = Arc::new(slow);
    let lb = Lookback::builder().with_adapter(slow.clone()).build().unwrap();

    let req = HistoricalRequest::new(
        crypto("ETHUSDT"),
        Resolution::Minute,
        TimeRange::new(dt(2024, 1, 1, 0, 0, 0), dt(2024, 1, 2, 0, 0, 0)),
    );
    let stream = lb.run_history(&[req], chrono_tz::UTC).unwrap();
    let taken: Vec<_> = stream.take(3).collect().await;
    assert_eq!(taken.len(), 3);
    assert!(taken.iter().all(Result::is_ok));
    assert_eq!(slow.points_served(), 4);
}
