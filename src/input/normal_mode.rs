use crossterm::event::KeyCode;

use crate::app::{HourField, WeekViewController};
use crate::input::KeyOutcome;
use crate::week::Preset;

pub fn handle_key(key: KeyCode, controller: &mut WeekViewController) -> KeyOutcome {
    match key {
        KeyCode::Char('q') => return KeyOutcome::Quit,
        KeyCode::Char('h') | KeyCode::Left => controller.prev_week(),
        KeyCode::Char('l') | KeyCode::Right => controller.next_week(),
        KeyCode::Char('t') => controller.go_to_today(),
        KeyCode::Char('j') | KeyCode::Down => return KeyOutcome::ScrollBy(1),
        KeyCode::Char('k') | KeyCode::Up => return KeyOutcome::ScrollBy(-1),
        KeyCode::Char('m') => controller.toggle_layout_mode(),
        KeyCode::Char('s') => controller.begin_edit(HourField::Start),
        KeyCode::Char('e') => controller.begin_edit(HourField::End),
        KeyCode::Char(c @ '1'..='4') => apply_preset_key(c, controller),
        _ => {}
    }
    KeyOutcome::Continue
}

fn apply_preset_key(key: char, controller: &mut WeekViewController) {
    let preset = match key {
        '1' => Preset::Full,
        '2' => Preset::Business,
        '3' => Preset::Evening,
        _ => Preset::Morning,
    };
    controller.apply_preset(preset);
}
