use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const FIRST_HOUR: u32 = 0;
pub const LAST_HOUR: u32 = 23;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown time range preset: {0}")]
pub struct UnknownPreset(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Full,
    Business,
    Evening,
    Morning,
}

impl Preset {
    pub const ALL: [Preset; 4] = [Preset::Full, Preset::Business, Preset::Evening, Preset::Morning];

    pub fn range(self) -> (u32, u32) {
        match self {
            Preset::Full => (0, 23),
            Preset::Business => (8, 18),
            Preset::Evening => (17, 23),
            Preset::Morning => (4, 12),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Full => "full",
            Preset::Business => "business",
            Preset::Evening => "evening",
            Preset::Morning => "morning",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Preset::Full => "Full 24h",
            Preset::Business => "Business hours",
            Preset::Evening => "Evening",
            Preset::Morning => "Morning",
        }
    }

    /// The preset whose range equals the window, used for toggle highlighting.
    pub fn matching(window: &TimeWindow) -> Option<Preset> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.range() == (window.start_hour(), window.end_hour()))
    }
}

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(Preset::Full),
            "business" => Ok(Preset::Business),
            "evening" => Ok(Preset::Evening),
            "morning" => Ok(Preset::Morning),
            other => Err(UnknownPreset(other.to_string())),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Visible hour range of the time grid. Both bounds are inclusive hour rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeWindow {
    start_hour: u32,
    end_hour: u32,
    show_full_day: bool,
}

impl TimeWindow {
    pub fn new() -> Self {
        Self {
            start_hour: FIRST_HOUR,
            end_hour: LAST_HOUR,
            show_full_day: true,
        }
    }

    pub fn from_preset(preset: Preset) -> Self {
        let mut window = Self::new();
        window.apply_preset(preset);
        window
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    pub fn show_full_day(&self) -> bool {
        self.show_full_day
    }

    /// Replaces both bounds. Returns `false` and leaves the window untouched
    /// when either bound is out of `0..=23` or `start > end`.
    pub fn set_range(&mut self, start: u32, end: u32) -> bool {
        if start > end || start > LAST_HOUR || end > LAST_HOUR {
            return false;
        }
        self.start_hour = start;
        self.end_hour = end;
        self.show_full_day = start == FIRST_HOUR && end == LAST_HOUR;
        true
    }

    pub fn set_start(&mut self, start: u32) -> bool {
        self.set_range(start, self.end_hour)
    }

    pub fn set_end(&mut self, end: u32) -> bool {
        self.set_range(self.start_hour, end)
    }

    pub fn apply_preset(&mut self, preset: Preset) {
        let (start, end) = preset.range();
        self.start_hour = start;
        self.end_hour = end;
        self.show_full_day = preset == Preset::Full;
    }

    pub fn contains_hour(&self, hour: u32) -> bool {
        hour >= self.start_hour && hour <= self.end_hour
    }

    /// Hour rows rendered by the grid.
    pub fn hours(&self) -> RangeInclusive<u32> {
        self.start_hour..=self.end_hour
    }

    pub fn row_count(&self) -> u32 {
        self.end_hour - self.start_hour + 1
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourInput {
    Empty,
    Invalid,
    Hour(u32),
}

/// Lenient integer parse of a typed hour: leading whitespace and sign are
/// accepted and anything after the leading digits is ignored, so `"9am"`
/// reads as 9. Values outside `0..=23` are `Invalid`.
pub fn parse_hour_input(raw: &str) -> HourInput {
    static LEADING_INT_RE: OnceLock<Regex> = OnceLock::new();

    if raw.trim().is_empty() {
        return HourInput::Empty;
    }

    let pattern = LEADING_INT_RE
        .get_or_init(|| Regex::new(r"^\s*([+-]?\d+)").expect("invalid leading integer regex"));

    let Some(digits) = pattern.captures(raw).and_then(|cap| cap.get(1)) else {
        return HourInput::Invalid;
    };

    match digits.as_str().parse::<i64>() {
        Ok(hour) if (FIRST_HOUR as i64..=LAST_HOUR as i64).contains(&hour) => {
            HourInput::Hour(hour as u32)
        }
        _ => HourInput::Invalid,
    }
}
