use std::collections::{HashMap, HashSet};
use std::hash::Hash;
pub use winit::keyboard::KeyCode;

/// Raw keyboard state for a single frame.
#[derive(Debug, Default)]
pub struct InputState {
    pub keys_held: HashSet<KeyCode>,
    pub keys_pressed: HashSet<KeyCode>,
    pub keys_released: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key going down.  Returns `false` for OS key-repeat events
    /// (the key was already held), which are not new presses.
    pub fn press(&mut self, key: KeyCode) -> bool {
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
            true
        } else {
            false
        }
    }

    pub fn release(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
        self.keys_released.insert(key);
    }

    pub fn clear_frame_state(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool { self.keys_held.contains(&key) }
    pub fn is_key_pressed(&self, key: KeyCode) -> bool { self.keys_pressed.contains(&key) }
    pub fn is_key_released(&self, key: KeyCode) -> bool { self.keys_released.contains(&key) }
}

/// Maps logical actions (defined by the game) to one or more keys.
#[derive(Debug, Clone)]
pub struct ActionMap<A: Hash + Eq + Copy> {
    bindings: HashMap<A, Vec<KeyCode>>,
    /// Each key drives exactly one action.
    by_key: HashMap<KeyCode, A>,
}

impl<A: Hash + Eq + Copy> ActionMap<A> {
    pub fn new() -> Self {
        Self { bindings: HashMap::new(), by_key: HashMap::new() }
    }

    /// Bind `key` to `action`.  A key already bound elsewhere moves to the
    /// new action.
    pub fn bind(&mut self, action: A, key: KeyCode) {
        if let Some(previous) = self.by_key.insert(key, action) {
            if let Some(keys) = self.bindings.get_mut(&previous) {
                keys.retain(|&k| k != key);
            }
        }
        self.bindings.entry(action).or_default().push(key);
    }

    /// The action `key` is bound to, if any.  Used to translate raw key
    /// events into game callbacks.
    pub fn action_for(&self, key: KeyCode) -> Option<A> {
        self.by_key.get(&key).copied()
    }

    /// Returns true if the action was triggered this frame (pressed).
    pub fn is_pressed(&self, action: A, input: &InputState) -> bool {
        self.any_key(action, |k| input.is_key_pressed(k))
    }

    /// Returns true if the action is currently being held.
    pub fn is_held(&self, action: A, input: &InputState) -> bool {
        self.any_key(action, |k| input.is_key_held(k))
    }

    /// Returns true if any bound key was released this frame.
    pub fn is_released(&self, action: A, input: &InputState) -> bool {
        self.any_key(action, |k| input.is_key_released(k))
    }

    fn any_key(&self, action: A, test: impl Fn(KeyCode) -> bool) -> bool {
        self.bindings.get(&action).is_some_and(|keys| keys.iter().any(|&k| test(k)))
    }
}

impl<A: Hash + Eq + Copy> Default for ActionMap<A> {
    fn default() -> Self { Self::new() }
}
