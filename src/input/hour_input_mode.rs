use crossterm::event::KeyCode;

use crate::app::{HourField, WeekViewController};
use crate::input::KeyOutcome;

/// Keys while an hour field has focus. Enter, Esc and Tab leave the field;
/// Tab moves on to the other one.
pub fn handle_key(key: KeyCode, field: HourField, controller: &mut WeekViewController) -> KeyOutcome {
    match key {
        KeyCode::Char(c) if c.is_ascii_digit() => {
            let mut draft = controller.state().input(field).to_string();
            draft.push(c);
            controller.edit_input(field, &draft);
        }
        KeyCode::Backspace => {
            let mut draft = controller.state().input(field).to_string();
            draft.pop();
            controller.edit_input(field, &draft);
        }
        KeyCode::Enter | KeyCode::Esc => {
            controller.commit_input(field);
        }
        KeyCode::Tab => {
            controller.commit_input(field);
            let other = match field {
                HourField::Start => HourField::End,
                HourField::End => HourField::Start,
            };
            controller.begin_edit(other);
        }
        _ => {}
    }
    KeyOutcome::Continue
}
