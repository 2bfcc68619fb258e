use crossterm::event::KeyCode;

use crate::app::{EditState, WeekViewController};

pub mod hour_input_mode;
pub mod normal_mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
    ScrollBy(i32),
}

pub fn handle_key(key: KeyCode, controller: &mut WeekViewController) -> KeyOutcome {
    match controller.state().edit {
        EditState::Idle => normal_mode::handle_key(key, controller),
        EditState::Editing(field) => hour_input_mode::handle_key(key, field, controller),
    }
}
