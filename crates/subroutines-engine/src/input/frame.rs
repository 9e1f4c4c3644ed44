use std::collections::HashSet;

use super::types::Key;

/// Key transitions collected since the last rendered frame.
///
/// Edge-triggered actions (swap models, exit) read this; held-key actions
/// (camera orbit) read `InputState` instead. The runtime clears it after
/// every `on_frame`.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Keys pressed this frame.
    pub keys_pressed: HashSet<Key>,

    /// Keys released this frame.
    pub keys_released: HashSet<Key>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
    }

    #[inline]
    pub fn released(&self, key: Key) -> bool {
        self.keys_released.contains(&key)
    }

    #[inline]
    pub fn pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }
}
