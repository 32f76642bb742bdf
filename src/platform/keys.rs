//! Keyboard mapping

use crate::sim::InputState;

/// What a key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Left,
    Right,
    Up,
    Down,
    /// Flip the vacuum on key press
    ToggleVacuum,
    Pause,
    /// Toggle demo mode
    Demo,
}

/// Map a `KeyboardEvent.key` value to an action
pub fn map_key(key: &str) -> Option<KeyAction> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(KeyAction::Left),
        "ArrowRight" | "d" | "D" => Some(KeyAction::Right),
        "ArrowUp" | "w" | "W" => Some(KeyAction::Up),
        "ArrowDown" | "s" | "S" => Some(KeyAction::Down),
        " " | "Spacebar" => Some(KeyAction::ToggleVacuum),
        "Escape" | "p" | "P" => Some(KeyAction::Pause),
        "i" | "I" => Some(KeyAction::Demo),
        _ => None,
    }
}

/// Apply a key press or release to the input flags.
///
/// Returns true if the action was consumed here; pause and demo are left to
/// the caller. Auto-repeated presses should be filtered out before calling,
/// otherwise a held Space would flicker the vacuum.
pub fn apply_key(input: &mut InputState, action: KeyAction, pressed: bool) -> bool {
    match action {
        KeyAction::Left => input.left = pressed,
        KeyAction::Right => input.right = pressed,
        KeyAction::Up => input.up = pressed,
        KeyAction::Down => input.down = pressed,
        KeyAction::ToggleVacuum => {
            if pressed {
                input.toggle_vacuum();
            }
        }
        KeyAction::Pause | KeyAction::Demo => return false,
    }
    true
}
