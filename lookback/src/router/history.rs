use core::fmt;
use core::pin::Pin;
use core::task::{Context, Poll};

use futures::Stream;
use futures::stream::FusedStream;
use lookback_core::{
    HistoricalRequest, LookbackError, PointCounter, SkippedRequest, Slice, SliceMerger, Tz,
};

use super::binding::Binding;
use super::guard::guard;
use crate::Lookback;

/// Time-ordered slices produced by one [`Lookback::run_history`] call.
///
/// Lazy and single-pass: adapters are only polled while this stream is
/// polled, and dropping it drops every adapter stream.
pub struct HistoryStream {
    merger: SliceMerger,
    skipped: Vec<SkippedRequest>,
}

impl HistoryStream {
    /// Bars and ticks placed into slices so far.
    ///
    /// Equals the total size of all slices yielded once the stream is
    /// exhausted.
    #[must_use]
    pub fn data_point_count(&self) -> u64 {
        self.merger.counter().read()
    }

    /// Handle to the run's counter, readable from another task.
    #[must_use]
    pub fn counter(&self) -> PointCounter {
        self.merger.counter().clone()
    }

    /// Requests that were accepted but served empty.
    #[must_use]
    pub fn skipped(&self) -> &[SkippedRequest] {
        &self.skipped
    }
}

impl fmt::Debug for HistoryStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryStream")
            .field("data_point_count", &self.data_point_count())
            .field("skipped", &self.skipped)
            .finish_non_exhaustive()
    }
}

impl Stream for HistoryStream {
    type Item = Result<Slice, LookbackError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.merger).poll_next(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.merger.size_hint()
    }
}

impl FusedStream for HistoryStream {
    fn is_terminated(&self) -> bool {
        self.merger.is_terminated()
    }
}

impl Lookback {
    /// Run a batch of history requests and merge the results into slices.
    ///
    /// Every request is bound before anything is fetched; the first
    /// validation failure aborts the whole batch. Requests with a degenerate
    /// range or an unsupported resolution/data kind contribute nothing and
    /// are listed in [`HistoryStream::skipped`].
    ///
    /// Slice times are expressed in `output_zone`; data inside a slice uses
    /// the request's own output zone when it has one.
    ///
    /// Behavior:
    /// - Adapter points whose end time falls outside the request range are
    ///   dropped when `clip_to_range` is set.
    /// - A point older than its predecessor either ends the run with a
    ///   `Data` error or is dropped, per `out_of_order`.
    /// - Adapter errors are yielded once and end the stream.
    ///
    /// # Errors
    /// Returns `InvalidSymbol` or `UnsupportedSecurityType` from binding.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "lookback::router::history::run_history",
            skip(self, requests),
            fields(requests = requests.len(), zone = %output_zone),
        )
    )]
    pub fn run_history(
        &self,
        requests: &[HistoricalRequest],
        output_zone: Tz,
    ) -> Result<HistoryStream, LookbackError> {
        let mut bound = Vec::with_capacity(requests.len());
        let mut skipped = Vec::new();
        for req in requests {
            match self.bind(req)? {
                Binding::Fetch(adapter) => bound.push((req, adapter)),
                Binding::Skip(reason) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        symbol = %req.symbol(),
                        resolution = %req.resolution(),
                        data_kind = %req.data_kind(),
                        %reason,
                        "serving request empty"
                    );
                    skipped.push(SkippedRequest {
                        symbol: req.symbol().clone(),
                        resolution: req.resolution(),
                        data_kind: req.data_kind(),
                        reason,
                    });
                }
            }
        }

        let sources = bound
            .into_iter()
            .map(|(req, adapter)| {
                let zone = req.output_zone().unwrap_or(output_zone);
                guard(
                    adapter.fetch_history(&req.to_fetch()),
                    adapter.name(),
                    req.range(),
                    zone,
                    self.cfg.clone(),
                )
            })
            .collect();

        Ok(HistoryStream {
            merger: SliceMerger::new(sources, output_zone, PointCounter::new()),
            skipped,
        })
    }
}
