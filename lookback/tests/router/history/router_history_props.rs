use std::collections::BTreeSet;

use lookback::{Lookback, SecurityType};
use proptest::prelude::*;

use crate::helpers::{
    ScriptedAdapter, bars, crypto, drain, minute_req, strictly_increasing, tick, tick_req,
    total_points,
};

fn minutes() -> impl Strategy<Value = BTreeSet<i64>> {
    prop::collection::btree_set(0i64..59, 0..20)
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 48, .. ProptestConfig::default() })]
    #[test]
    fn merged_runs_are_ordered_complete_and_counted(
        eth_m in minutes(),
        btc_m in minutes(),
        sol_ticks in prop::collection::vec(0i64..3600, 0..30),
    ) {
        let eth = crypto("ETHUSDT");
        let btc = crypto("BTCUSDT");
        let sol = crypto("SOLUSDT");
        let mut sol_sorted = sol_ticks.clone();
        sol_sorted.sort_unstable();

        let ex = ScriptedAdapter::builder()
            .market("binance")
            .serves(SecurityType::Crypto)
            .with_series("ETHUSDT", bars(&eth, &eth_m.iter().copied().collect::<Vec<_>>()))
            .with_series("BTCUSDT", bars(&btc, &btc_m.iter().copied().collect::<Vec<_>>()))
            .with_series(
                "SOLUSDT",
                sol_sorted.iter().map(|&s| tick(&sol, s, 100)).collect(),
            )
            .build();
        let lb = Lookback::builder().with_adapter(ex).build().unwrap();
        let reqs = [minute_req(eth), minute_req(btc), tick_req(sol)];

        let (slices, err, count) = tokio_test::block_on(async {
            drain(lb.run_history(&reqs, chrono_tz::UTC).unwrap()).await
        });
        prop_assert!(err.is_none());
        prop_assert!(strictly_increasing(&slices));
        prop_assert!(slices.iter().all(|s| !s.is_empty()));
        prop_assert_eq!(count, total_points(&slices));
        prop_assert_eq!(
            count as usize,
            eth_m.len() + btc_m.len() + sol_ticks.len()
        );

        // one slice per distinct end instant, in seconds from the start of 2024
        let mut instants: BTreeSet<i64> = BTreeSet::new();
        instants.extend(eth_m.iter().chain(btc_m.iter()).map(|m| (m + 1) * 60));
        instants.extend(sol_ticks.iter().copied());
        prop_assert_eq!(slices.len(), instants.len());

        let again = tokio_test::block_on(async {
            drain(lb.run_history(&reqs, chrono_tz::UTC).unwrap()).await
        });
        prop_assert_eq!(again.0, slices);
        prop_assert_eq!(again.2, count);
    }
}
