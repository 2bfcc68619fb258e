use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::{CalendarEvent, decimal_hour};
use crate::week::navigator::{DAYS_PER_WEEK, DayColumn};
use crate::week::time_window::TimeWindow;

pub const DEFAULT_HOUR_HEIGHT: f64 = 60.0;
pub const DEFAULT_TIME_COLUMN_WIDTH: f64 = 60.0;
pub const MIN_EVENT_HEIGHT: f64 = 20.0;
pub const MAX_SIDE_BY_SIDE: usize = 3;
pub const COLUMN_FILL: f64 = 0.9;
pub const MOBILE_EVENT_WIDTH: f64 = 80.0;
pub const DESKTOP_MIN_WIDTH_PX: f64 = 80.0;
pub const EVENT_Z_INDEX: u32 = 20;
pub const EVENT_OPACITY: f64 = 0.95;
pub const DEFAULT_EVENT_COLOR: &str = "#4285F4";
pub const DEFAULT_AUTO_SCROLL_OFFSET: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown layout mode: {0} (expected desktop or mobile)")]
pub struct InvalidLayoutMode(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Desktop,
    Mobile,
}

impl LayoutMode {
    pub fn toggled(self) -> Self {
        match self {
            LayoutMode::Desktop => LayoutMode::Mobile,
            LayoutMode::Mobile => LayoutMode::Desktop,
        }
    }
}

impl FromStr for LayoutMode {
    type Err = InvalidLayoutMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "desktop" => Ok(LayoutMode::Desktop),
            "mobile" => Ok(LayoutMode::Mobile),
            other => Err(InvalidLayoutMode(other.to_string())),
        }
    }
}

/// Sizing of the time grid: pixel height of one hour row and the share of
/// the grid width (percent) taken by the hour label column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    pub hour_height: f64,
    pub time_column_width: f64,
    pub layout: LayoutMode,
}

impl GridMetrics {
    pub fn column_width(&self) -> f64 {
        (100.0 - self.time_column_width) / DAYS_PER_WEEK as f64
    }

    pub fn column_start(&self, index: usize) -> f64 {
        index as f64 * self.column_width() + self.time_column_width
    }
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            hour_height: DEFAULT_HOUR_HEIGHT,
            time_column_width: DEFAULT_TIME_COLUMN_WIDTH,
            layout: LayoutMode::Desktop,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "unit", content = "value", rename_all = "lowercase")]
pub enum MinWidth {
    Percent(f64),
    Pixels(f64),
}

impl fmt::Display for MinWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinWidth::Percent(value) => write!(f, "{}%", value),
            MinWidth::Pixels(value) => write!(f, "{}px", value),
        }
    }
}

/// Absolute placement of one event in one day column. `top`/`height` are
/// pixels from the first visible hour; `left`/`width` are percent of the
/// whole grid width including the hour label column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventGeometry {
    pub top: f64,
    pub height: f64,
    pub left: f64,
    pub width: f64,
    pub min_width: MinWidth,
    pub z_index: u32,
    pub background_color: String,
    pub opacity: f64,
}

/// Cuts the event down to the part that falls on `day`.
pub fn clip_to_day(event: &CalendarEvent, day: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let day_start = day.and_time(NaiveTime::MIN);
    let last_instant = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    let day_end = day.and_time(last_instant);

    (event.start.max(day_start), event.end.min(day_end))
}

/// Places `event` inside `column`. `slot_index` is the event's 0-based
/// position in its overlap group and `cluster_size` the group length.
///
/// Desktop layout fits at most three events side by side; further slots
/// wrap around and overlap earlier ones. Mobile layout ignores the group.
pub fn event_geometry(
    event: &CalendarEvent,
    column: &DayColumn,
    window: &TimeWindow,
    metrics: &GridMetrics,
    cluster_size: usize,
    slot_index: usize,
) -> EventGeometry {
    let (clipped_start, clipped_end) = clip_to_day(event, column.date);
    let start_hour = window.start_hour() as f64;
    let visible_start = decimal_hour(clipped_start).max(start_hour);
    let visible_end = decimal_hour(clipped_end).min(window.end_hour() as f64 + 1.0);

    let top = (visible_start - start_hour) * metrics.hour_height;
    let height = ((visible_end - visible_start) * metrics.hour_height).max(MIN_EVENT_HEIGHT);

    let column_start = metrics.column_start(column.index);
    let (left, width, min_width) = match metrics.layout {
        LayoutMode::Mobile => (
            column_start,
            MOBILE_EVENT_WIDTH,
            MinWidth::Percent(MOBILE_EVENT_WIDTH),
        ),
        LayoutMode::Desktop => {
            let side_by_side = cluster_size.clamp(1, MAX_SIDE_BY_SIDE);
            let width = metrics.column_width() / side_by_side as f64 * COLUMN_FILL;
            let slot = slot_index % side_by_side;
            let left = column_start + slot as f64 * width / side_by_side as f64;
            (left, width, MinWidth::Pixels(DESKTOP_MIN_WIDTH_PX))
        }
    };

    EventGeometry {
        top,
        height,
        left,
        width,
        min_width,
        z_index: EVENT_Z_INDEX,
        background_color: event
            .color
            .clone()
            .unwrap_or_else(|| DEFAULT_EVENT_COLOR.to_string()),
        opacity: EVENT_OPACITY,
    }
}

/// Offset of the now-indicator line, or `None` when the current hour is
/// outside the window.
pub fn current_time_position(now: NaiveTime, window: &TimeWindow, hour_height: f64) -> Option<f64> {
    if !window.contains_hour(now.hour()) {
        return None;
    }
    let hours_in = (now.hour() - window.start_hour()) as f64;
    Some(hours_in * hour_height + (now.minute() as f64 / 60.0) * hour_height)
}

/// Scroll offset that brings the current hour into view, `offset` pixels
/// below the top edge. `None` when the current hour is not displayed.
pub fn auto_scroll_target(now: NaiveTime, window: &TimeWindow, hour_height: f64, offset: f64) -> Option<f64> {
    if !window.contains_hour(now.hour()) {
        return None;
    }
    Some((now.hour() - window.start_hour()) as f64 * hour_height - offset)
}
