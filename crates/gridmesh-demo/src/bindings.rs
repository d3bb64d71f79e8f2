use gridmesh_engine::input::{InputFrame, Key};

/// Something a key press asks the demo to do.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Action {
    Quit,
    ToggleWireframe,
    Remap,
    ToggleRotation,
}

/// Key to action table, checked in declaration order every frame.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    table: Vec<(Key, Action)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            table: vec![
                (Key::Escape, Action::Quit),
                (Key::F1, Action::ToggleWireframe),
                (Key::F2, Action::Remap),
                (Key::F3, Action::ToggleRotation),
            ],
        }
    }
}

impl KeyBindings {
    /// Actions whose key went down this frame.
    pub fn actions<'a>(&'a self, frame: &'a InputFrame) -> impl Iterator<Item = Action> + 'a {
        self.table
            .iter()
            .filter(|(key, _)| frame.pressed(*key))
            .map(|&(_, action)| action)
    }
}

/// Demo toggles driven by key actions.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Toggles {
    pub wireframe: bool,
    pub rotate: bool,
    pub remap: bool,
    pub quit: bool,
}

impl Toggles {
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.quit = true,
            Action::ToggleWireframe => self.wireframe = !self.wireframe,
            Action::Remap => self.remap = true,
            Action::ToggleRotation => self.rotate = !self.rotate,
        }
    }
}
