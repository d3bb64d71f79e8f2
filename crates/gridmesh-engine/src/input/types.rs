/// Keyboard key identifier.
///
/// Only keys the demo can bind are named; everything else is `Key::Other`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    F1,
    F2,
    F3,
    Other,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Platform-agnostic input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        /// Set by the platform for auto-repeated presses of a held key.
        repeat: bool,
    },
    Focused(bool),
}
