use crate::decay::DecayState;
use crate::error::ConfigError;
use crate::events::Timestamped;

/// A completed run of contiguous events. Ownership moves to the batch
/// handler on every flush.
pub type Batch<E> = Vec<E>;

/// Splits a stream of events into variable-length batches driven by the
/// current decay estimate.
///
/// Each incoming event is appended to the in-progress batch, then scored by
///
/// `weight = 1 / (1e-6 * t_diff * n_decay + 1)`
///
/// where `t_diff` is the elapsed time since the batch's first event and
/// `n_decay` comes from the decay state the caller passes in. The denser the
/// stream, the faster the weight drops for a given elapsed time, so dense
/// periods produce short batches and sparse periods long ones. Once the
/// weight falls below the threshold the batch is moved out to the handler
/// and accumulation restarts from empty.
///
/// The decay state handed to [`process`](Self::process) must already be
/// advanced past the current event; composing through
/// [`Pipeline`](crate::pipeline::Pipeline) takes care of the ordering.
///
/// The end of the stream does not flush: events still buffered when input
/// runs out stay available through [`pending`](Self::pending) and
/// [`take_pending`](Self::take_pending).
pub struct BatchSegmenter<E, F> {
    weight_thresh: f32,
    batch: Batch<E>,
    handle_batch: F,
}

impl<E, F> BatchSegmenter<E, F>
where
    E: Timestamped,
    F: FnMut(Batch<E>),
{
    /// Builds a segmenter with the given split threshold, typically in
    /// (0, 1). The threshold must be finite and strictly positive.
    pub fn new(weight_thresh: f32, handle_batch: F) -> Result<Self, ConfigError> {
        if !weight_thresh.is_finite() || weight_thresh <= 0.0 {
            return Err(ConfigError::InvalidWeightThreshold(weight_thresh));
        }
        Ok(Self {
            weight_thresh,
            batch: Batch::new(),
            handle_batch,
        })
    }

    /// Appends one event and flushes the batch to the handler if its weight
    /// crossed below the threshold.
    ///
    /// An emitted batch is never empty: the event is appended before the
    /// weight test, so a flush carries at least that event.
    pub fn process(&mut self, event: E, decay: &DecayState) {
        let t = event.timestamp();
        self.batch.push(event);

        let t_first = self.batch[0].timestamp();
        let t_diff = if t > t_first { (t - t_first) as f32 } else { 0.0 };
        let weight = 1.0 / (1e-6 * t_diff * decay.n_decay + 1.0);

        if weight < self.weight_thresh {
            let batch = std::mem::take(&mut self.batch);
            (self.handle_batch)(batch);
        }
    }

    /// Events accumulated since the last flush.
    #[inline]
    pub fn pending(&self) -> &[E] {
        &self.batch
    }

    /// Takes the in-progress batch, leaving the segmenter empty. Callers use
    /// this at end of stream to recover a trailing partial batch the
    /// threshold never closed.
    pub fn take_pending(&mut self) -> Batch<E> {
        std::mem::take(&mut self.batch)
    }

    /// Discards the in-progress batch without emitting it. Meant for when
    /// the surrounding context is reinitialized and partial accumulation
    /// should not survive.
    pub fn reset(&mut self) {
        self.batch.clear();
    }
}
