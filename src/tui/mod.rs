mod presentation;
pub mod sample_events;
mod session;

pub use session::run_tui;
