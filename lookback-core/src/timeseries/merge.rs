use core::cmp::Ordering;
use core::pin::Pin;
use core::task::{Context, Poll};
use std::collections::BinaryHeap;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use futures::Stream;
use futures::stream::FusedStream;

use crate::LookbackError;
use crate::adapter::DataStream;
use crate::counter::PointCounter;
use crate::data::MarketData;
use crate::slice::Slice;

/// Next pending point of one source, ordered so the earliest instant (then
/// lowest source index) sits on top of the max-heap.
struct Head {
    at: DateTime<Utc>,
    source: usize,
    point: MarketData,
}

impl Head {
    const fn key(&self) -> (DateTime<Utc>, usize) {
        (self.at, self.source)
    }
}

impl PartialEq for Head {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Head {}

impl PartialOrd for Head {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Head {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

/// Lazy k-way merge of ascending per-request streams into time-ordered slices.
///
/// Behavior:
/// - Holds at most one buffered point per source. A source is polled again
///   only after its buffered point has been placed into a slice.
/// - Every point sharing the earliest pending instant (by end time) goes into
///   the same slice, including consecutive ticks of one source.
/// - Slice times are strictly increasing and expressed in the output zone.
/// - The counter is bumped once per point placed into a slice. A bar that
///   collides with an earlier source's bar for the same symbol and instant is
///   dropped and not counted.
/// - The first source error is yielded once; all sources are then dropped and
///   the stream ends.
///
/// Sources must be ascending by end time. Callers that cannot guarantee this
/// should filter them first.
pub struct SliceMerger {
    sources: Vec<Option<DataStream>>,
    refill: Vec<usize>,
    heap: BinaryHeap<Head>,
    building: Option<Slice>,
    zone: Tz,
    counter: PointCounter,
    done: bool,
}

impl SliceMerger {
    /// Merge `sources`, stamping slices in `zone` and tallying into `counter`.
    ///
    /// The counter is reset here; this is the start of the run.
    #[must_use]
    pub fn new(sources: Vec<DataStream>, zone: Tz, counter: PointCounter) -> Self {
        counter.reset();
        let refill = (0..sources.len()).rev().collect();
        Self {
            heap: BinaryHeap::with_capacity(sources.len()),
            sources: sources.into_iter().map(Some).collect(),
            refill,
            building: None,
            zone,
            counter,
            done: false,
        }
    }

    /// Handle to the run's point counter.
    #[must_use]
    pub fn counter(&self) -> &PointCounter {
        &self.counter
    }

    fn finish(&mut self) {
        self.done = true;
        self.sources.clear();
        self.refill.clear();
        self.heap.clear();
        self.building = None;
    }

    /// Poll every source awaiting a new head. `Ready(Some(err))` aborts the merge.
    fn poll_refill(&mut self, cx: &mut Context<'_>) -> Poll<Option<LookbackError>> {
        while let Some(&idx) = self.refill.last() {
            let Some(src) = self.sources.get_mut(idx).and_then(Option::as_mut) else {
                self.refill.pop();
                continue;
            };
            match src.as_mut().poll_next(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Some(Ok(point))) => {
                    self.refill.pop();
                    let at = point.end_time().with_timezone(&Utc);
                    self.heap.push(Head {
                        at,
                        source: idx,
                        point,
                    });
                }
                Poll::Ready(Some(Err(e))) => return Poll::Ready(Some(e)),
                Poll::Ready(None) => {
                    self.refill.pop();
                    self.sources[idx] = None;
                }
            }
        }
        Poll::Ready(None)
    }
}

impl Stream for SliceMerger {
    type Item = Result<Slice, LookbackError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.done {
            return Poll::Ready(None);
        }
        loop {
            match this.poll_refill(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Some(e)) => {
                    this.finish();
                    return Poll::Ready(Some(Err(e)));
                }
                Poll::Ready(None) => {}
            }

            let next_at = this.heap.peek().map(|h| h.at);
            if let Some(slice) = &this.building {
                let slice_at = slice.time().with_timezone(&Utc);
                if next_at.is_none_or(|at| at > slice_at) {
                    return Poll::Ready(this.building.take().map(Ok));
                }
            }

            let Some(at) = next_at else {
                this.finish();
                return Poll::Ready(None);
            };

            let zone = this.zone;
            let slice = this
                .building
                .get_or_insert_with(|| Slice::new(at.with_timezone(&zone)));
            while this.heap.peek().is_some_and(|h| h.at == at) {
                let Some(head) = this.heap.pop() else { break };
                #[cfg(feature = "tracing")]
                let symbol = head.point.symbol().clone();
                if slice.insert(head.point) {
                    this.counter.increment(1);
                } else {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        %symbol,
                        ts = %at,
                        source = head.source,
                        "dropping duplicate bar (first source wins)"
                    );
                }
                this.refill.push(head.source);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, None)
        }
    }
}

impl FusedStream for SliceMerger {
    fn is_terminated(&self) -> bool {
        self.done
    }
}
