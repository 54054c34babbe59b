//! Per-frame input snapshot

use crate::Keys;

/// Immutable input snapshot for one frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    /// Keys that went down this frame
    pub down: Keys,
    /// Keys currently held
    pub held: Keys,
    /// Keys that went up this frame
    pub up: Keys,
}

impl InputState {
    /// Create a snapshot from the three masks
    pub const fn new(down: Keys, held: Keys, up: Keys) -> Self {
        Self { down, held, up }
    }

    /// Derive a snapshot from the held mask of the previous and current frame
    pub fn from_transition(previous_held: Keys, current_held: Keys) -> Self {
        Self {
            down: current_held - previous_held,
            held: current_held,
            up: previous_held - current_held,
        }
    }

    /// Any of `keys` went down this frame
    #[inline]
    pub fn pressed(&self, keys: Keys) -> bool {
        self.down.intersects(keys)
    }

    /// Any of `keys` is held
    #[inline]
    pub fn holding(&self, keys: Keys) -> bool {
        self.held.intersects(keys)
    }

    /// Any of `keys` went up this frame
    #[inline]
    pub fn released(&self, keys: Keys) -> bool {
        self.up.intersects(keys)
    }
}
