use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl CalendarEvent {
    pub fn timed(id: &str, title: &str, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            start,
            end,
            all_day: false,
            color: None,
            location: None,
        }
    }

    pub fn all_day(id: &str, title: &str, date: NaiveDate) -> Self {
        let start = date.and_time(NaiveTime::MIN);
        Self {
            id: id.to_string(),
            title: title.to_string(),
            start,
            end: start,
            all_day: true,
            color: None,
            location: None,
        }
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Time of day of the start as `hour + minute / 60`. Seconds are ignored.
    pub fn start_decimal_hour(&self) -> f64 {
        decimal_hour(self.start)
    }

    pub fn end_decimal_hour(&self) -> f64 {
        decimal_hour(self.end)
    }

    pub fn time_label(&self) -> String {
        if self.all_day {
            "All Day".to_string()
        } else {
            format!("{}-{}", self.start.format("%H:%M"), self.end.format("%H:%M"))
        }
    }
}

pub fn decimal_hour(at: NaiveDateTime) -> f64 {
    at.hour() as f64 + at.minute() as f64 / 60.0
}
