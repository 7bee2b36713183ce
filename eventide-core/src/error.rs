use thiserror::Error;

/// Construction-time configuration errors.
///
/// Both estimators validate their numeric parameters when built; a rejected
/// parameter never produces a partially-initialized component.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("initial time decay must be finite and strictly positive, got {0}")]
    InvalidTimeDecay(f32),
    #[error("weight threshold must be finite and strictly positive, got {0}")]
    InvalidWeightThreshold(f32),
}
