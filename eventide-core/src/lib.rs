/*!
Online event-rate estimation and adaptive batching for event-camera streams.
*/

pub mod batch;
pub mod decay;
pub mod error;
pub mod events;
pub mod pipeline;
pub mod stats;

pub use batch::{Batch, BatchSegmenter};
pub use decay::{DecayEstimator, DecayState};
pub use error::ConfigError;
pub use events::{Event, Timestamped};
pub use pipeline::Pipeline;
pub use stats::{StreamStatistics, StreamTracker};
