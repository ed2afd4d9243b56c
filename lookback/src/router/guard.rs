//! Per-request stream wrapper applied between an adapter and the merger.

use chrono::{DateTime, Utc};
use futures::{StreamExt, future};
use lookback_core::{
    DataStream, DispatchConfig, LookbackError, MarketData, OutOfOrderPolicy, TimeRange, Tz,
};

struct OrderGuard {
    adapter: &'static str,
    range: TimeRange,
    cfg: DispatchConfig,
    zone: Tz,
    last: Option<DateTime<Utc>>,
    failed: bool,
}

impl OrderGuard {
    /// `None` ends the stream, `Some(None)` skips the item.
    fn step(
        &mut self,
        item: Result<MarketData, LookbackError>,
    ) -> Option<Option<Result<MarketData, LookbackError>>> {
        if self.failed {
            return None;
        }
        let point = match item {
            Ok(point) => point,
            Err(e) => {
                self.failed = true;
                return Some(Some(Err(e)));
            }
        };

        let at = point.end_time().with_timezone(&Utc);
        if self.cfg.clip_to_range && !self.range.contains(at) {
            return Some(None);
        }

        if let Some(last) = self.last
            && at < last
        {
            return match self.cfg.out_of_order {
                OutOfOrderPolicy::Drop => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        adapter = self.adapter,
                        symbol = %point.symbol(),
                        ts = %at,
                        last = %last,
                        "dropping out-of-order point"
                    );
                    Some(None)
                }
                OutOfOrderPolicy::Fail => {
                    self.failed = true;
                    Some(Some(Err(LookbackError::Data(format!(
                        "{} returned {} out of order: {at} after {last}",
                        self.adapter,
                        point.symbol()
                    )))))
                }
            };
        }

        self.last = Some(at);
        Some(Some(Ok(point.with_timezone(&self.zone))))
    }
}

/// Clip to `range`, enforce ascending end times, and express timestamps in `zone`.
pub(crate) fn guard(
    stream: DataStream,
    adapter: &'static str,
    range: TimeRange,
    zone: Tz,
    cfg: DispatchConfig,
) -> DataStream {
    let state = OrderGuard {
        adapter,
        range,
        cfg,
        zone,
        last: None,
        failed: false,
    };
    stream
        .scan(state, |g, item| future::ready(g.step(item)))
        .filter_map(future::ready)
        .boxed()
}
