/*!
Command-line surface for eventide: recording decode, spatial cropping, and
logging setup shared by the tools under `src/bin`.
*/

pub mod crop;
pub mod format;
pub mod logging;

pub use crop::CropWindow;
pub use format::{FormatError, Header, RecordingReader, RecordingWriter};
