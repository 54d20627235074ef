use std::collections::HashMap;

/// The bound keys the demo reacts to. Frontends translate their own key
/// codes into these before feeding the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    KeyR,
    F2,
    F11,
}

#[derive(Debug, Clone, Copy, Default)]
struct KeyState {
    held: bool,
    just_pressed: bool,
    just_released: bool,
}

/// Per-key state with edge detection.
///
/// Events are recorded as they arrive; [`KeyTracker::advance`] is called
/// once at the start of each tick to clear the previous tick's edges, so
/// the core sees a stable snapshot for the whole tick.
#[derive(Debug, Default)]
pub struct KeyTracker {
    states: HashMap<Button, KeyState>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press or release event for a bound key.
    pub fn record(&mut self, button: Button, pressed: bool) {
        let state = self.states.entry(button).or_default();
        if pressed {
            // Key repeat re-delivers presses while held; only a real edge
            // sets just_pressed.
            if !state.held {
                state.just_pressed = true;
            }
            state.held = true;
        } else {
            if state.held {
                state.just_released = true;
            }
            state.held = false;
        }
    }

    /// Start a new tick: edges from the previous tick expire, held state
    /// persists.
    pub fn advance(&mut self) {
        for state in self.states.values_mut() {
            state.just_pressed = false;
            state.just_released = false;
        }
    }

    pub fn held(&self, button: Button) -> bool {
        self.states.get(&button).is_some_and(|s| s.held)
    }

    pub fn just_pressed(&self, button: Button) -> bool {
        self.states.get(&button).is_some_and(|s| s.just_pressed)
    }

    pub fn just_released(&self, button: Button) -> bool {
        self.states.get(&button).is_some_and(|s| s.just_released)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_sets_held_and_edge() {
        let mut tracker = KeyTracker::new();
        tracker.record(Button::ArrowUp, true);
        assert!(tracker.held(Button::ArrowUp));
        assert!(tracker.just_pressed(Button::ArrowUp));
        assert!(!tracker.just_released(Button::ArrowUp));
    }

    #[test]
    fn edge_expires_after_advance_but_held_persists() {
        let mut tracker = KeyTracker::new();
        tracker.record(Button::ArrowLeft, true);
        tracker.advance();
        assert!(tracker.held(Button::ArrowLeft));
        assert!(!tracker.just_pressed(Button::ArrowLeft));
    }

    #[test]
    fn key_repeat_does_not_retrigger_just_pressed() {
        let mut tracker = KeyTracker::new();
        tracker.record(Button::KeyR, true);
        tracker.advance();
        tracker.record(Button::KeyR, true); // OS key repeat
        assert!(!tracker.just_pressed(Button::KeyR));
        assert!(tracker.held(Button::KeyR));
    }

    #[test]
    fn release_sets_just_released_once() {
        let mut tracker = KeyTracker::new();
        tracker.record(Button::F2, true);
        tracker.advance();
        tracker.record(Button::F2, false);
        assert!(tracker.just_released(Button::F2));
        assert!(!tracker.held(Button::F2));
        tracker.advance();
        assert!(!tracker.just_released(Button::F2));
    }

    #[test]
    fn unknown_keys_read_as_idle() {
        let tracker = KeyTracker::new();
        assert!(!tracker.held(Button::F11));
        assert!(!tracker.just_pressed(Button::F11));
        assert!(!tracker.just_released(Button::F11));
    }
}
