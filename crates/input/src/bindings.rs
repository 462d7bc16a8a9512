use crate::action::Action;
use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Physical key to action table.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<KeyCode, Action>,
}

impl Default for KeyBindings {
    /// Escape quits, P captures.
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings.bind(KeyCode::Escape, Action::Quit);
        bindings.bind(KeyCode::KeyP, Action::CaptureFrame);
        bindings
    }
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Bind `key` to `action`, replacing any previous binding.
    pub fn bind(&mut self, key: KeyCode, action: Action) {
        if let Some(previous) = self.map.insert(key, action) {
            tracing::debug!(?key, ?previous, ?action, "rebound key");
        }
    }

    pub fn action_for(&self, key: KeyCode) -> Action {
        self.map.get(&key).copied().unwrap_or(Action::Noop)
    }

    /// Resolve a key event. Releases and auto-repeat resolve to [`Action::Noop`].
    pub fn resolve(&self, key: KeyCode, pressed: bool, repeat: bool) -> Action {
        if !pressed || repeat {
            return Action::Noop;
        }
        self.action_for(key)
    }
}
