//! Deterministic history generation.
//!
//! Prices depend only on the ticker and the point's timestamp, so repeated
//! fetches of the same window yield identical data.

use chrono::{DateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use lookback_core::{Bar, DataKind, FetchRequest, MarketData, Resolution, Symbol, Tick};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

pub type Points = Box<dyn Iterator<Item = MarketData> + Send>;

/// FNV-1a over the ticker bytes.
fn ticker_seed(ticker: &str) -> u64 {
    ticker.bytes().fold(0xcbf2_9ce4_8422_2325, |h, b| {
        (h ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
    })
}

fn rng_at(seed: u64, ts: i64, salt: u64) -> StdRng {
    StdRng::seed_from_u64(seed ^ (ts as u64).rotate_left(17) ^ salt)
}

/// Base price in cents, between 10.00 and 5000.00.
fn base_cents(seed: u64) -> i64 {
    1_000 + (seed % 499_000) as i64
}

fn bar(symbol: &Symbol, time: DateTime<Tz>, period: TimeDelta, seed: u64) -> MarketData {
    let ts = time.timestamp();
    let mut rng = rng_at(seed, ts, 0);
    let base = base_cents(seed);
    let open = base + rng.random_range(-200..=200);
    let close = base + rng.random_range(-200..=200);
    let high = open.max(close) + rng.random_range(0..=50);
    let low = (open.min(close) - rng.random_range(0..=50)).max(1);
    let volume = rng.random_range(1..=10_000);
    MarketData::Bar(Bar {
        symbol: symbol.clone(),
        time,
        period,
        open: Decimal::new(open, 2),
        high: Decimal::new(high, 2),
        low: Decimal::new(low, 2),
        close: Decimal::new(close, 2),
        volume: Decimal::new(volume, 3),
    })
}

fn tick(symbol: &Symbol, time: DateTime<Tz>, seq: u64, kind: DataKind, seed: u64) -> MarketData {
    let mut rng = rng_at(seed, time.timestamp(), seq.wrapping_add(1));
    let mid = base_cents(seed) + rng.random_range(-100..=100);
    let (quantity, bid, ask) = match kind {
        DataKind::Quote => {
            let half_spread = rng.random_range(1..=5);
            (
                Decimal::ZERO,
                Some(Decimal::new(mid - half_spread, 2)),
                Some(Decimal::new(mid + half_spread, 2)),
            )
        }
        _ => (Decimal::new(rng.random_range(1..=5_000), 3), None, None),
    };
    MarketData::Tick(Tick {
        symbol: symbol.clone(),
        time,
        kind,
        price: Decimal::new(mid, 2),
        quantity,
        bid,
        ask,
    })
}

/// Lazily generate the points an exchange would return for `req`.
///
/// Bars start at the period boundary at or before `range.start` and continue
/// while their open time is before `range.end`, so the first and last bar
/// may straddle the window. Daily bars align to midnight in `zone`. Ticks
/// are emitted `ticks_per_second` at a time on every whole second in
/// `[start, end)`.
pub fn generate(req: &FetchRequest, zone: Tz, ticks_per_second: u64) -> Points {
    let start = req.range.start();
    let end = req.range.end();
    if end <= start {
        return Box::new(std::iter::empty());
    }
    let symbol = req.symbol.clone();
    let seed = ticker_seed(symbol.ticker());

    match req.resolution {
        Resolution::Tick => {
            let kind = req.data_kind;
            let first = start.timestamp() + i64::from(start.timestamp_subsec_nanos() > 0);
            let stop = end.timestamp() + i64::from(end.timestamp_subsec_nanos() > 0);
            let seconds = (first..stop)
                .filter_map(move |secs| DateTime::<Utc>::from_timestamp(secs, 0))
                .map(move |utc| utc.with_timezone(&zone));
            Box::new(seconds.flat_map(move |time| {
                let symbol = symbol.clone();
                (0..ticks_per_second).map(move |seq| tick(&symbol, time, seq, kind, seed))
            }))
        }
        Resolution::Daily => {
            let period = TimeDelta::days(1);
            let first_day = start.with_timezone(&zone).date_naive();
            let last_day = (end - TimeDelta::nanoseconds(1)).with_timezone(&zone).date_naive();
            // a DST gap can swallow midnight; that day has no bar
            let days = first_day
                .iter_days()
                .take_while(move |day| *day <= last_day)
                .filter_map(move |day| {
                    zone.from_local_datetime(&day.and_time(NaiveTime::MIN)).earliest()
                });
            Box::new(days.map(move |open| bar(&symbol, open, period, seed)))
        }
        Resolution::Second | Resolution::Minute | Resolution::Hour => {
            let step = req.resolution.seconds().unwrap_or(1);
            let period = TimeDelta::seconds(step);
            let first = start.timestamp().div_euclid(step) * step;
            let end_secs = end.timestamp();
            let opens = (0..)
                .map(move |i: i64| first + i * step)
                .take_while(move |secs| *secs < end_secs);
            Box::new(opens.filter_map(move |secs| {
                let open = DateTime::<Utc>::from_timestamp(secs, 0)?.with_timezone(&zone);
                Some(bar(&symbol, open, period, seed))
            }))
        }
    }
}
