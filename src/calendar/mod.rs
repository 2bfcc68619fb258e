pub mod event;

pub use event::{CalendarEvent, decimal_hour};
