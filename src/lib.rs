pub mod app;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod input;
pub mod timers;
pub mod ui;
pub mod week;

pub use app::{HourField, WeekLayout, WeekViewController, WeekViewState};
pub use calendar::CalendarEvent;
