//! Raw replay frame records.

use serde::{Deserialize, Serialize};

/// Pressed-key bitmask, one bit per button (std) or per column (mania).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyMask(pub u32);

impl KeyMask {
    pub const NONE: Self = Self(0);

    pub fn down(&self, bit: usize) -> bool {
        self.0 & (1 << bit) != 0
    }

    pub fn any(&self) -> bool {
        self.0 != 0
    }

    /// Bits set here but not in `prev` (keys that just went down).
    pub fn pressed_since(&self, prev: KeyMask) -> KeyMask {
        KeyMask(self.0 & !prev.0)
    }

    /// Bits set in `prev` but not here (keys that just came up).
    pub fn released_since(&self, prev: KeyMask) -> KeyMask {
        KeyMask(prev.0 & !self.0)
    }
}

/// One raw std replay frame: absolute time, cursor position, key state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StdFrame {
    /// Frame time in milliseconds.
    pub time: i32,
    /// Cursor x position.
    pub x: f32,
    /// Cursor y position.
    pub y: f32,
    /// Buttons held this frame.
    pub keys: KeyMask,
}

/// One raw mania replay frame: delta time and the column bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManiaFrame {
    /// Milliseconds since the previous frame.
    pub delta: i32,
    /// Columns held this frame.
    pub keys: KeyMask,
}
