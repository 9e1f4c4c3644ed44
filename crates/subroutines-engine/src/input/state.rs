use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState};

/// Current input state for a single window.
///
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = f;
                if !f {
                    // Avoids stuck keys when focus changes mid-press.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(key) {
                        frame.keys_pressed.insert(key);
                    }
                }
                KeyState::Released => {
                    if self.keys_down.remove(&key) {
                        frame.keys_released.insert(key);
                    }
                }
            },
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState, repeat: bool) -> InputEvent {
        InputEvent::Key { key, state, repeat }
    }

    #[test]
    fn press_is_recorded_once() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::Space, KeyState::Pressed, false));
        assert!(state.key_down(Key::Space));
        assert!(frame.pressed(Key::Space));

        frame.clear();
        state.apply_event(&mut frame, key(Key::Space, KeyState::Pressed, true));
        assert!(!frame.pressed(Key::Space), "auto-repeat must not count as a new press");
        assert!(state.key_down(Key::Space));
    }

    #[test]
    fn release_is_recorded() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::Escape, KeyState::Pressed, false));
        state.apply_event(&mut frame, key(Key::Escape, KeyState::Released, false));
        assert!(!state.key_down(Key::Escape));
        assert!(frame.released(Key::Escape));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::Unknown(42), KeyState::Released, false));
        assert!(frame.keys_released.is_empty());
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, InputEvent::Focused(true));
        state.apply_event(&mut frame, key(Key::ArrowLeft, KeyState::Pressed, false));
        state.apply_event(&mut frame, InputEvent::Focused(false));

        assert!(!state.focused);
        assert!(state.keys_down.is_empty());
    }

    #[test]
    fn clear_drops_frame_deltas_only() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::Digit1, KeyState::Pressed, false));
        frame.clear();

        assert!(frame.keys_pressed.is_empty());
        assert!(frame.keys_released.is_empty());
        assert!(state.key_down(Key::Digit1));
    }

    #[test]
    fn frame_holds_one_entry_per_key_between_clears() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        for _ in 0..1000 {
            state.apply_event(&mut frame, key(Key::Space, KeyState::Pressed, false));
            state.apply_event(&mut frame, key(Key::Space, KeyState::Released, false));
        }

        assert_eq!(frame.keys_pressed.len(), 1);
        assert_eq!(frame.keys_released.len(), 1);
    }
}
