pub mod geometry;
pub mod navigator;
pub mod overlap;
pub mod time_window;
pub mod visibility;

pub use geometry::{EventGeometry, GridMetrics, LayoutMode, MinWidth, event_geometry};
pub use navigator::{DayColumn, WeekNavigator};
pub use overlap::{OverlapGroup, group_overlapping};
pub use time_window::{HourInput, Preset, TimeWindow, parse_hour_input};
pub use visibility::{hidden_events, is_visible};
