use crate::events::Timestamped;

/// Aggregate counters over an event stream. No adaptive state; duration is
/// simply `t - t_first`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamStatistics {
    /// Current timestamp [microseconds].
    pub t: u64,
    /// First timestamp of the stream [microseconds].
    pub t_first: u64,
    /// Number of events seen so far.
    pub number_events: u64,
    /// Elapsed stream time [microseconds].
    pub duration: u64,
}

impl StreamStatistics {
    /// Canonical projection for [`StreamTracker`]: packs the tracker's
    /// counters into a `StreamStatistics` value.
    pub fn project<E: Timestamped>(
        event: &E,
        t_first: u64,
        number_events: u64,
        duration: u64,
    ) -> Self {
        Self {
            t: event.timestamp(),
            t_first,
            number_events,
            duration,
        }
    }
}

/// Per-event statistics counter.
///
/// Latches the first timestamp, counts events, and computes the running
/// duration. Each event is mapped through the projection closure and the
/// result handed to the handler synchronously.
pub struct StreamTracker<M, H> {
    t: u64,
    t_first: u64,
    number_events: u64,
    first: bool,
    map: M,
    handle: H,
}

impl<M, H> StreamTracker<M, H> {
    pub fn new(map: M, handle: H) -> Self {
        Self {
            t: 0,
            t_first: 0,
            number_events: 0,
            first: true,
            map,
            handle,
        }
    }

    /// Folds one event into the counters and notifies the handler.
    ///
    /// Panics:
    /// - Asserts that timestamps are non-decreasing across calls.
    pub fn process<E, S>(&mut self, event: &E)
    where
        E: Timestamped,
        M: FnMut(&E, u64, u64, u64) -> S,
        H: FnMut(S),
    {
        let t = event.timestamp();
        assert!(
            t >= self.t,
            "event timestamp {} regressed behind {}",
            t,
            self.t
        );

        if self.first {
            self.t_first = t;
            self.first = false;
        }
        self.t = t;
        self.number_events += 1;

        let statistics = (self.map)(event, self.t_first, self.number_events, t - self.t_first);
        (self.handle)(statistics);
    }
}
