use crate::error::ConfigError;
use crate::events::Timestamped;

/// Snapshot of the rate estimator after folding in one event.
///
/// Invariants:
/// - `decay` is in (0, 1]; 1 means no time elapsed since the previous event.
/// - `t_decay` stays strictly positive: it is a convex combination of a
///   positive seed and a non-negative interval.
/// - `rate` is finite and non-negative as long as the above hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayState {
    /// Timestamp of the most recently processed event [microseconds].
    pub t: u64,
    /// Fraction of the previous state surviving the elapsed gap, in (0, 1].
    pub decay: f32,
    /// Exponentially decayed running event count.
    pub n_decay: f32,
    /// Smoothed estimate of the characteristic inter-event time [microseconds].
    pub t_decay: f32,
    /// Estimated event rate [events/microsecond].
    pub rate: f32,
}

impl DecayState {
    fn seeded(t_decay_first: f32) -> Self {
        Self {
            t: 0,
            decay: 1.0,
            n_decay: 0.0,
            t_decay: t_decay_first,
            rate: 0.0,
        }
    }
}

/// Online estimator of the local event rate.
///
/// Maintains an O(1) exponentially-weighted recursion over inter-event
/// intervals so consumers can reason about how dense the stream currently is
/// without buffering history. Every update is pushed synchronously to the
/// registered handler before `process` returns.
///
/// Per event with gap `dt` to the previous one:
/// - `decay    = exp(-dt / t_decay)`
/// - `t_decay' = decay * t_decay + (1 - decay) * dt`
/// - `n_decay' = decay * n_decay + 1`
/// - `rate'    = n_decay' / t_decay'`
///
/// Bursts of simultaneous events (`dt = 0`) leave `decay = 1` and `t_decay`
/// untouched while `n_decay` grows by one per event, so the rate tracks burst
/// density correctly.
pub struct DecayEstimator<F> {
    state: DecayState,
    handle_decay: F,
}

impl<F> DecayEstimator<F>
where
    F: FnMut(DecayState),
{
    /// Builds an estimator seeded with the initial inter-event time
    /// assumption `t_decay_first` [microseconds].
    ///
    /// The seed must be finite and strictly positive; it is what keeps
    /// `t_decay` away from zero for the whole life of the estimator.
    pub fn new(t_decay_first: f32, handle_decay: F) -> Result<Self, ConfigError> {
        if !t_decay_first.is_finite() || t_decay_first <= 0.0 {
            return Err(ConfigError::InvalidTimeDecay(t_decay_first));
        }
        Ok(Self {
            state: DecayState::seeded(t_decay_first),
            handle_decay,
        })
    }

    /// Folds one event into the estimate and hands the updated state to the
    /// handler.
    ///
    /// Panics:
    /// - Asserts that timestamps are non-decreasing across calls. A
    ///   regression would silently corrupt every subsequent estimate, so it
    ///   aborts instead of clamping.
    pub fn process<E: Timestamped>(&mut self, event: &E) {
        let t = event.timestamp();
        assert!(
            t >= self.state.t,
            "event timestamp {} regressed behind {}",
            t,
            self.state.t
        );

        let dt = (t - self.state.t) as f32;
        let decay = (-dt / self.state.t_decay).exp();
        let t_decay = decay * self.state.t_decay + (1.0 - decay) * dt;
        let n_decay = decay * self.state.n_decay + 1.0;

        self.state = DecayState {
            t,
            decay,
            n_decay,
            t_decay,
            rate: n_decay / t_decay,
        };
        (self.handle_decay)(self.state);
    }

    /// Current state, advanced past the last processed event.
    #[inline]
    pub fn state(&self) -> &DecayState {
        &self.state
    }

    /// Restores the initial state under a fresh seed, validated the same way
    /// as at construction.
    pub fn reset(&mut self, t_decay_first: f32) -> Result<(), ConfigError> {
        if !t_decay_first.is_finite() || t_decay_first <= 0.0 {
            return Err(ConfigError::InvalidTimeDecay(t_decay_first));
        }
        self.state = DecayState::seeded(t_decay_first);
        Ok(())
    }
}
