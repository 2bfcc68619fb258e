use chrono::{Days, NaiveDate};
use weekgrid::calendar::CalendarEvent;

/// A demo week starting at `week_start`: overlapping meetings, a crowded
/// afternoon, an overnight event, an early run hidden by business hours and
/// an all-day holiday.
pub fn week_of(week_start: NaiveDate) -> Vec<CalendarEvent> {
    let samples = [
        ("Morning Standup", 0, (9, 0), 0, (9, 30), None, None),
        ("Sprint Planning", 0, (10, 0), 0, (11, 30), Some("#33b679"), Some("Room A")),
        ("Design Review", 0, (11, 0), 0, (12, 0), Some("#e67c73"), None),
        ("Early Run", 1, (6, 0), 1, (7, 0), Some("#f6bf26"), Some("Riverside")),
        ("Lunch with Team", 1, (12, 30), 1, (13, 30), None, Some("Downtown Cafe")),
        ("Interview", 2, (14, 0), 2, (15, 0), Some("#8e24aa"), None),
        ("Vendor Call", 2, (14, 15), 2, (14, 45), None, None),
        ("Pairing", 2, (14, 30), 2, (16, 0), Some("#039be5"), None),
        ("Retro Prep", 2, (14, 40), 2, (15, 30), Some("#616161"), None),
        ("Release Night", 3, (22, 0), 4, (1, 30), Some("#d50000"), None),
        ("1-on-1 with Manager", 4, (11, 0), 4, (11, 30), None, None),
        ("Evening Yoga", 5, (18, 0), 5, (19, 15), Some("#0b8043"), Some("Studio 4")),
    ];

    let mut events = Vec::new();
    for (i, (title, start_day, (start_h, start_m), end_day, (end_h, end_m), color, location)) in
        samples.into_iter().enumerate()
    {
        let Some(start_date) = week_start.checked_add_days(Days::new(start_day)) else { continue };
        let Some(end_date) = week_start.checked_add_days(Days::new(end_day)) else { continue };
        let Some(start) = start_date.and_hms_opt(start_h, start_m, 0) else { continue };
        let Some(end) = end_date.and_hms_opt(end_h, end_m, 0) else { continue };

        let mut event = CalendarEvent::timed(&format!("sample_{}", i), title, start, end);
        if let Some(color) = color {
            event = event.with_color(color);
        }
        if let Some(location) = location {
            event = event.with_location(location);
        }
        events.push(event);
    }

    if let Some(friday) = week_start.checked_add_days(Days::new(4)) {
        events.push(CalendarEvent::all_day("sample_holiday", "Company Holiday", friday).with_color("#7986cb"));
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_stay_inside_the_requested_week() {
        let week_start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let week_end = NaiveDate::from_ymd_opt(2025, 1, 12).unwrap();

        let events = week_of(week_start);

        assert_eq!(events.len(), 13);
        for event in &events {
            assert!(event.start <= event.end);
            assert!(event.start.date() >= week_start && event.end.date() <= week_end);
        }
    }
}
