use crate::keys::{Button, KeyTracker};
use ringrun_common::Steer;

/// Presentation-side commands decoupled from the run state. Handled once
/// per tick by the frame loop whether or not the run is still live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideCommand {
    /// Rebuild the render pipelines from their shader sources.
    ReloadShaders,
    /// Show or hide the debug UI.
    ToggleUi,
    /// Enter or leave fullscreen.
    ToggleFullscreen,
}

/// Steering signals for this tick, from the held arrow keys.
pub fn steer(tracker: &KeyTracker) -> Steer {
    Steer {
        pitch_up: tracker.held(Button::ArrowUp),
        pitch_down: tracker.held(Button::ArrowDown),
        yaw_left: tracker.held(Button::ArrowLeft),
        yaw_right: tracker.held(Button::ArrowRight),
    }
}

/// Side-channel commands that fired this tick. Reload triggers on the
/// press edge; the toggles on release, so holding the key flips them once.
pub fn side_commands(tracker: &KeyTracker) -> Vec<SideCommand> {
    let mut commands = Vec::new();
    if tracker.just_pressed(Button::KeyR) {
        commands.push(SideCommand::ReloadShaders);
    }
    if tracker.just_released(Button::F2) {
        commands.push(SideCommand::ToggleUi);
    }
    if tracker.just_released(Button::F11) {
        commands.push(SideCommand::ToggleFullscreen);
    }
    if !commands.is_empty() {
        tracing::debug!(?commands, "side commands");
    }
    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_arrows_produce_steer_signals() {
        let mut tracker = KeyTracker::new();
        tracker.record(Button::ArrowLeft, true);
        tracker.record(Button::ArrowUp, true);
        let s = steer(&tracker);
        assert!(s.yaw_left);
        assert!(s.pitch_up);
        assert!(!s.yaw_right);
        assert!(!s.pitch_down);
    }

    #[test]
    fn no_keys_is_neutral_steer() {
        let tracker = KeyTracker::new();
        assert!(steer(&tracker).is_neutral());
    }

    #[test]
    fn reload_fires_on_press_edge_only() {
        let mut tracker = KeyTracker::new();
        tracker.record(Button::KeyR, true);
        assert_eq!(side_commands(&tracker), vec![SideCommand::ReloadShaders]);
        tracker.advance();
        // Still held, no new edge.
        assert!(side_commands(&tracker).is_empty());
    }

    #[test]
    fn toggles_fire_on_release() {
        let mut tracker = KeyTracker::new();
        tracker.record(Button::F2, true);
        assert!(side_commands(&tracker).is_empty());
        tracker.advance();
        tracker.record(Button::F2, false);
        assert_eq!(side_commands(&tracker), vec![SideCommand::ToggleUi]);
    }

    #[test]
    fn multiple_commands_in_one_tick() {
        let mut tracker = KeyTracker::new();
        tracker.record(Button::KeyR, true);
        tracker.record(Button::F11, true);
        tracker.record(Button::F11, false);
        let commands = side_commands(&tracker);
        assert!(commands.contains(&SideCommand::ReloadShaders));
        assert!(commands.contains(&SideCommand::ToggleFullscreen));
    }
}
