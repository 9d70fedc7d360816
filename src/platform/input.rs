//! Keyboard to action mapping
//!
//! Each action is bound to an arrow key and a WASD key. An action stays
//! active while any of its keys is held. Consumers either poll the current
//! [`InputState`] or subscribe to per-action change notifications.

use serde::{Deserialize, Serialize};

/// Logical movement actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Forward,
    Backward,
    Left,
    Right,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::Forward,
        Action::Backward,
        Action::Left,
        Action::Right,
    ];

    /// Physical keys (`KeyboardEvent.code`) bound to this action
    pub fn key_codes(&self) -> [&'static str; 2] {
        match self {
            Action::Forward => ["ArrowUp", "KeyW"],
            Action::Backward => ["ArrowDown", "KeyS"],
            Action::Left => ["ArrowLeft", "KeyA"],
            Action::Right => ["ArrowRight", "KeyD"],
        }
    }

    /// Action bound to a key code, if any
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.key_codes().contains(&code))
    }

    /// Letter shown on the on-screen key UI
    pub fn label(&self) -> &'static str {
        match self {
            Action::Forward => "W",
            Action::Backward => "S",
            Action::Left => "A",
            Action::Right => "D",
        }
    }

    fn index(self) -> usize {
        match self {
            Action::Forward => 0,
            Action::Backward => 1,
            Action::Left => 2,
            Action::Right => 3,
        }
    }
}

/// Snapshot of the four movement flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl InputState {
    pub fn get(&self, action: Action) -> bool {
        match action {
            Action::Forward => self.forward,
            Action::Backward => self.backward,
            Action::Left => self.left,
            Action::Right => self.right,
        }
    }

    fn set(&mut self, action: Action, pressed: bool) {
        match action {
            Action::Forward => self.forward = pressed,
            Action::Backward => self.backward = pressed,
            Action::Left => self.left = pressed,
            Action::Right => self.right = pressed,
        }
    }

    pub fn any(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

/// Handle returned by [`InputBridge::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

type Listener = Box<dyn FnMut(Action, bool)>;

/// Maps raw key events to action state
pub struct InputBridge {
    state: InputState,
    /// Held bound keys per action, indexed by `Action::index`
    held: [Vec<&'static str>; 4],
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u32,
}

impl Default for InputBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBridge {
    pub fn new() -> Self {
        Self {
            state: InputState::default(),
            held: Default::default(),
            listeners: Vec::new(),
            next_id: 1,
        }
    }

    /// Current action state (poll-based read)
    pub fn state(&self) -> InputState {
        self.state
    }

    /// Handle a key press. Returns true if the key is bound to an action.
    pub fn key_down(&mut self, code: &str) -> bool {
        let Some(action) = Action::from_code(code) else {
            return false;
        };
        let held = &mut self.held[action.index()];
        if let Some(key) = action.key_codes().into_iter().find(|k| *k == code) {
            if !held.contains(&key) {
                held.push(key);
            }
        }
        self.update(action);
        true
    }

    /// Handle a key release. Returns true if the key is bound to an action.
    pub fn key_up(&mut self, code: &str) -> bool {
        let Some(action) = Action::from_code(code) else {
            return false;
        };
        self.held[action.index()].retain(|k| *k != code);
        self.update(action);
        true
    }

    /// Drop every held key (window lost focus, key-ups will never arrive)
    pub fn release_all(&mut self) {
        for action in Action::ALL {
            self.held[action.index()].clear();
            self.update(action);
        }
    }

    /// Register a listener called with `(action, pressed)` whenever an
    /// action's state changes
    pub fn subscribe(&mut self, listener: impl FnMut(Action, bool) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if the id is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn update(&mut self, action: Action) {
        let pressed = !self.held[action.index()].is_empty();
        if self.state.get(action) == pressed {
            return;
        }
        self.state.set(action, pressed);
        for (_, listener) in self.listeners.iter_mut() {
            listener(action, pressed);
        }
    }
}
