use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub title: Color,
    pub weekday_header: Color,
    pub today: Color,
    pub weekend: Color,
    pub hour_label: Color,
    pub grid_line: Color,
    pub now_line: Color,
    pub toggle_on: Color,
    pub input_focus: Color,
    pub warning: Color,
    pub all_day: Color,
    pub event_text: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            name: "default".to_string(),
            title: Color::Cyan,
            weekday_header: Color::Yellow,
            today: Color::Green,
            weekend: Color::Magenta,
            hour_label: Color::DarkGray,
            grid_line: Color::DarkGray,
            now_line: Color::Red,
            toggle_on: Color::Blue,
            input_focus: Color::White,
            warning: Color::Yellow,
            all_day: Color::Blue,
            event_text: Color::White,
        }
    }

    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            title: Color::Rgb(251, 184, 108),
            weekday_header: Color::Rgb(254, 128, 25),
            today: Color::Rgb(184, 187, 38),
            weekend: Color::Rgb(211, 134, 155),
            hour_label: Color::Rgb(146, 131, 116),
            grid_line: Color::Rgb(80, 73, 69),
            now_line: Color::Rgb(251, 73, 52),
            toggle_on: Color::Rgb(69, 133, 136),
            input_focus: Color::Rgb(235, 219, 178),
            warning: Color::Rgb(250, 189, 47),
            all_day: Color::Rgb(69, 133, 136),
            event_text: Color::Rgb(251, 241, 199),
        }
    }

    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            title: Color::Rgb(136, 192, 208),
            weekday_header: Color::Rgb(235, 203, 139),
            today: Color::Rgb(163, 190, 140),
            weekend: Color::Rgb(180, 142, 173),
            hour_label: Color::Rgb(76, 86, 106),
            grid_line: Color::Rgb(59, 66, 82),
            now_line: Color::Rgb(191, 97, 106),
            toggle_on: Color::Rgb(94, 129, 172),
            input_focus: Color::Rgb(236, 239, 244),
            warning: Color::Rgb(235, 203, 139),
            all_day: Color::Rgb(129, 161, 193),
            event_text: Color::Rgb(236, 239, 244),
        }
    }

    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            title: Color::Rgb(139, 233, 253),
            weekday_header: Color::Rgb(241, 250, 140),
            today: Color::Rgb(80, 250, 123),
            weekend: Color::Rgb(189, 147, 249),
            hour_label: Color::Rgb(98, 114, 164),
            grid_line: Color::Rgb(68, 71, 90),
            now_line: Color::Rgb(255, 85, 85),
            toggle_on: Color::Rgb(255, 121, 198),
            input_focus: Color::Rgb(248, 248, 242),
            warning: Color::Rgb(255, 184, 108),
            all_day: Color::Rgb(98, 114, 164),
            event_text: Color::Rgb(248, 248, 242),
        }
    }

    pub fn get_by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            "dracula" => Self::dracula(),
            _ => Self::default_theme(),
        }
    }

    pub fn available_themes() -> Vec<&'static str> {
        vec!["default", "gruvbox", "nord", "dracula"]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}

/// Parses `#RRGGBB` (or `RRGGBB`) event colours.
pub fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
