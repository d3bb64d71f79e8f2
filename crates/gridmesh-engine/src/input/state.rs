use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState};

/// Current keyboard state for the window.
///
/// Transitions are recorded into an `InputFrame` as events are applied.
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,

    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies an event to the held-key set and writes transitions to `frame`.
    ///
    /// A press of a key that is already down (platform auto-repeat) records no
    /// transition.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases can be missed while unfocused.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(*key) {
                        frame.keys_pressed.insert(*key);
                    }
                }
                KeyState::Released => {
                    if self.keys_down.remove(key) {
                        frame.keys_released.insert(*key);
                    }
                }
            },
        }

        frame.push_event(ev);
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
    fn press_is_reported_once_while_held() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::F2, KeyState::Pressed, false));
        assert!(frame.pressed(Key::F2));
        frame.clear();

        state.apply_event(&mut frame, key(Key::F2, KeyState::Pressed, true));
        state.apply_event(&mut frame, key(Key::F2, KeyState::Pressed, true));
        assert!(!frame.pressed(Key::F2));
        assert!(state.key_down(Key::F2));
    }

    #[test]
    fn release_then_press_is_a_new_edge() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::F1, KeyState::Pressed, false));
        frame.clear();
        state.apply_event(&mut frame, key(Key::F1, KeyState::Released, false));
        assert!(frame.released(Key::F1));
        frame.clear();

        state.apply_event(&mut frame, key(Key::F1, KeyState::Pressed, false));
        assert!(frame.pressed(Key::F1));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, key(Key::F3, KeyState::Released, false));
        assert!(!frame.released(Key::F3));
        assert_eq!(frame.events.len(), 1);
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::Escape, KeyState::Pressed, false));
        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(!state.key_down(Key::Escape));
        frame.clear();

        // Coming back with the key still physically down counts as a fresh press.
        state.apply_event(&mut frame, InputEvent::Focused(true));
        state.apply_event(&mut frame, key(Key::Escape, KeyState::Pressed, true));
        assert!(frame.pressed(Key::Escape));
    }
}
