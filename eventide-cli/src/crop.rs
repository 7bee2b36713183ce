//! Streaming rectangle filter over incoming events.

use eventide_core::Event;

/// Half-open crop window `[left, right) x [bottom, top)`.
///
/// Events passing the filter keep their original sensor coordinates; the
/// window only decides membership, it does not re-base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropWindow {
    pub left: u16,
    pub right: u16,
    pub bottom: u16,
    pub top: u16,
}

impl CropWindow {
    /// Window covering the whole sensor.
    pub fn full(width: u16, height: u16) -> Self {
        Self {
            left: 0,
            right: width,
            bottom: 0,
            top: height,
        }
    }

    #[inline]
    pub fn contains(&self, event: &Event) -> bool {
        event.x >= self.left && event.x < self.right && event.y >= self.bottom && event.y < self.top
    }
}
