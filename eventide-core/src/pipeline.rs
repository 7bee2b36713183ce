use crate::batch::{Batch, BatchSegmenter};
use crate::decay::{DecayEstimator, DecayState};
use crate::error::ConfigError;
use crate::events::Timestamped;

/// Explicit composition of the estimator pair.
///
/// For every event the decay estimator runs first, then the segmenter scores
/// the same event against the just-updated state. Keeping both halves behind
/// one `process` call encodes that ordering obligation in a single place
/// instead of leaving it to every call site.
///
/// Strictly single-threaded: handlers run synchronously inside `process`,
/// and a pipeline serves exactly one stream. Independent streams each get
/// their own pipeline with no shared state.
pub struct Pipeline<E, FD, FB> {
    decay: DecayEstimator<FD>,
    segmenter: BatchSegmenter<E, FB>,
}

impl<E, FD, FB> Pipeline<E, FD, FB>
where
    E: Timestamped,
    FD: FnMut(DecayState),
    FB: FnMut(Batch<E>),
{
    /// Builds the pair, validating both numeric parameters.
    pub fn new(
        t_decay_first: f32,
        weight_thresh: f32,
        handle_decay: FD,
        handle_batch: FB,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            decay: DecayEstimator::new(t_decay_first, handle_decay)?,
            segmenter: BatchSegmenter::new(weight_thresh, handle_batch)?,
        })
    }

    /// Runs one event through the decay update and then the segmenter.
    pub fn process(&mut self, event: E) {
        self.decay.process(&event);
        self.segmenter.process(event, self.decay.state());
    }

    /// Decay state after the most recent event.
    #[inline]
    pub fn decay_state(&self) -> &DecayState {
        self.decay.state()
    }

    /// Events accumulated since the last flush.
    #[inline]
    pub fn pending(&self) -> &[E] {
        self.segmenter.pending()
    }

    /// Consumes the pipeline at end of stream, returning whatever trailing
    /// partial batch the threshold never closed.
    pub fn into_pending(mut self) -> Batch<E> {
        self.segmenter.take_pending()
    }

    /// Reinitializes the decay estimator under a fresh seed and discards any
    /// partially accumulated batch without emitting it.
    pub fn reset(&mut self, t_decay_first: f32) -> Result<(), ConfigError> {
        self.decay.reset(t_decay_first)?;
        self.segmenter.reset();
        Ok(())
    }
}
