use chrono::Timelike;
use chrono_tz::{America, Asia};
use lookback::{Lookback, SecurityType};

use crate::helpers::{ScriptedAdapter, at, bars, crypto, drain, minute_req};

#[tokio::test]
async fn slices_and_data_use_the_run_zone() {
    let eth = crypto("ETHUSDT");
    let ex = ScriptedAdapter::builder()
        .market("binance")
        .serves(SecurityType::Crypto)
        .with_series("ETHUSDT", bars(&eth, &[0, 1]))
        .build();
    let lb = Lookback::builder().with_adapter(ex).build().unwrap();
    let (slices, _, _) = drain(
        lb.run_history(&[minute_req(eth.clone())], America::New_York)
            .unwrap(),
    )
    .await;

    let first = &slices[0];
    assert_eq!(first.time().timezone(), America::New_York);
    // 2024-01-01 00:01 UTC is 19:01 the previous evening in New York
    assert_eq!(first.time().hour(), 19);
    assert_eq!(*first.time(), at(1));
    assert_eq!(first.bar(&eth).unwrap().time.timezone(), America::New_York);
}

#[tokio::test]
async fn request_zone_overrides_data_timestamps_only() {
    let eth = crypto("ETHUSDT");
    let btc = crypto("BTCUSDT");
    let ex = ScriptedAdapter::builder()
        .zone(chrono_tz::UTC)
        .market("binance")
        .serves(SecurityType::Crypto)
        .with_series("ETHUSDT", bars(&eth, &[0]))
        .with_series("BTCUSDT", bars(&btc, &[0]))
        .build();
    let lb = Lookback::builder().with_adapter(ex).build().unwrap();
    let reqs = [
        minute_req(eth.clone()).with_output_zone(Asia::Tokyo),
        minute_req(btc.clone()),
    ];
    let (slices, _, count) = drain(lb.run_history(&reqs, America::New_York).unwrap()).await;

    assert_eq!(slices.len(), 1);
    assert_eq!(count, 2);
    let slice = &slices[0];
    assert_eq!(slice.time().timezone(), America::New_York);
    let eth_bar = slice.bar(&eth).unwrap();
    let btc_bar = slice.bar(&btc).unwrap();
    assert_eq!(eth_bar.time.timezone(), Asia::Tokyo);
    assert_eq!(eth_bar.time.hour(), 9);
    assert_eq!(btc_bar.time.timezone(), America::New_York);
    assert_eq!(eth_bar.time, btc_bar.time);
}

#[tokio::test]
async fn adapter_zone_does_not_shift_instants() {
    let eth = crypto("ETHUSDT");
    let native: Vec<_> = bars(&eth, &[0, 1])
        .into_iter()
        .map(|p| p.with_timezone(&Asia::Kolkata))
        .collect();
    let ex = ScriptedAdapter::builder()
        .zone(Asia::Kolkata)
        .market("binance")
        .serves(SecurityType::Crypto)
        .with_series("ETHUSDT", native)
        .build();
    let lb = Lookback::builder().with_adapter(ex).build().unwrap();
    let (slices, _, _) = drain(lb.run_history(&[minute_req(eth)], chrono_tz::UTC).unwrap()).await;
    assert_eq!(*slices[0].time(), at(1));
    assert_eq!(*slices[1].time(), at(2));
}
