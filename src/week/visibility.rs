use chrono::{NaiveDate, NaiveTime};

use crate::calendar::CalendarEvent;
use crate::week::time_window::TimeWindow;

/// All-day events are always visible. A timed event is visible when its
/// time-of-day span reaches the window: `start <= endHour && end >= startHour`.
///
/// The comparison uses `endHour` itself while geometry clamps to
/// `endHour + 1`; events starting inside the last visible hour therefore
/// count as visible and are drawn in that last row.
pub fn is_visible(event: &CalendarEvent, window: &TimeWindow) -> bool {
    if event.all_day {
        return true;
    }
    let event_start = event.start_decimal_hour();
    let event_end = event.end_decimal_hour();

    event_start <= window.end_hour() as f64 && event_end >= window.start_hour() as f64
}

/// Timed events that fall outside the window. Feeds the warning banner only.
pub fn hidden_events<'a>(events: &'a [CalendarEvent], window: &TimeWindow) -> Vec<&'a CalendarEvent> {
    events
        .iter()
        .filter(|event| !event.all_day && !is_visible(event, window))
        .collect()
}

/// Whether the event is drawn in the column for `day`: it starts or ends on
/// that date, or spans across the day's midnight.
pub fn touches_day(event: &CalendarEvent, day: NaiveDate) -> bool {
    let midnight = day.and_time(NaiveTime::MIN);
    event.start.date() == day
        || event.end.date() == day
        || (event.start <= midnight && event.end >= midnight)
}

/// Timed events to lay out in the column for `day`, in input order.
pub fn timed_events_for_day<'a>(
    events: &'a [CalendarEvent],
    day: NaiveDate,
    window: &TimeWindow,
) -> Vec<&'a CalendarEvent> {
    events
        .iter()
        .filter(|event| !event.all_day && touches_day(event, day) && is_visible(event, window))
        .collect()
}

pub fn all_day_events_for_day(events: &[CalendarEvent], day: NaiveDate) -> Vec<&CalendarEvent> {
    events
        .iter()
        .filter(|event| event.all_day && touches_day(event, day))
        .collect()
}

pub fn hidden_events_warning(hidden_count: usize) -> Option<String> {
    match hidden_count {
        0 => None,
        1 => Some("Warning: 1 event is outside the selected time range and is not visible.".to_string()),
        n => Some(format!(
            "Warning: {} events are outside the selected time range and are not visible.",
            n
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::week::time_window::Preset;
    use chrono::NaiveDateTime;
    use proptest::prelude::*;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    #[test]
    fn early_event_hidden_during_business_hours() {
        let window = TimeWindow::from_preset(Preset::Business);
        let event = CalendarEvent::timed("d", "Run", at(6, 6, 0), at(6, 7, 0));

        assert!(!is_visible(&event, &window));

        let events = vec![event.clone()];
        assert_eq!(hidden_events(&events, &window), vec![&event]);
    }

    #[test]
    fn all_day_event_always_visible_and_never_hidden() {
        let window = TimeWindow::from_preset(Preset::Evening);
        let event = CalendarEvent::all_day("h", "Holiday", date(6));

        assert!(is_visible(&event, &window));
        assert!(hidden_events(&[event], &window).is_empty());
    }

    #[test]
    fn event_ending_exactly_at_start_hour_is_visible() {
        let window = TimeWindow::from_preset(Preset::Business);
        let event = CalendarEvent::timed("e", "Breakfast", at(6, 7, 0), at(6, 8, 0));

        assert!(is_visible(&event, &window));
    }

    #[test]
    fn event_starting_inside_last_hour_is_visible() {
        let window = TimeWindow::from_preset(Preset::Business);
        let inside = CalendarEvent::timed("a", "Wrap-up", at(6, 18, 0), at(6, 18, 30));
        let after = CalendarEvent::timed("b", "Dinner", at(6, 18, 1), at(6, 19, 0));

        assert!(is_visible(&inside, &window));
        assert!(!is_visible(&after, &window));
    }

    #[test]
    fn overnight_event_touches_both_days() {
        let event = CalendarEvent::timed("e", "Party", at(6, 23, 30), at(7, 0, 30));

        assert!(touches_day(&event, date(6)));
        assert!(touches_day(&event, date(7)));
        assert!(!touches_day(&event, date(8)));
    }

    #[test]
    fn multi_day_event_touches_middle_day() {
        let event = CalendarEvent::timed("e", "Conference", at(6, 9, 0), at(8, 17, 0));

        assert!(touches_day(&event, date(7)));
    }

    #[test]
    fn timed_events_for_day_excludes_all_day_and_hidden() {
        let window = TimeWindow::from_preset(Preset::Business);
        let events = vec![
            CalendarEvent::timed("a", "Sync", at(6, 10, 0), at(6, 11, 0)),
            CalendarEvent::timed("b", "Gym", at(6, 5, 0), at(6, 6, 0)),
            CalendarEvent::all_day("c", "Offsite", date(6)),
            CalendarEvent::timed("d", "Call", at(7, 10, 0), at(7, 11, 0)),
        ];

        let ids: Vec<&str> = timed_events_for_day(&events, date(6), &window)
            .iter()
            .map(|e| e.id.as_str())
            .collect();

        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn all_day_events_listed_per_day() {
        let events = vec![
            CalendarEvent::all_day("a", "Holiday", date(6)),
            CalendarEvent::all_day("b", "Trip", date(7)),
            CalendarEvent::timed("c", "Sync", at(6, 10, 0), at(6, 11, 0)),
        ];

        let monday = all_day_events_for_day(&events, date(6));

        assert_eq!(monday.len(), 1);
        assert_eq!(monday[0].id, "a");
    }

    #[test]
    fn warning_text_agrees_with_count() {
        assert_eq!(hidden_events_warning(0), None);
        assert_eq!(
            hidden_events_warning(1).unwrap(),
            "Warning: 1 event is outside the selected time range and is not visible."
        );
        assert_eq!(
            hidden_events_warning(3).unwrap(),
            "Warning: 3 events are outside the selected time range and are not visible."
        );
    }

    proptest! {
        #[test]
        fn widening_the_window_never_hides_a_visible_event(
            start_minutes in 0u32..1440,
            length in 0u32..600,
            start_hour in 0u32..24,
            end_hour in 0u32..24,
            widen_start in 0u32..24,
            widen_end in 0u32..24,
        ) {
            prop_assume!(start_hour <= end_hour);
            let start = at(6, 0, 0) + chrono::Duration::minutes(start_minutes as i64);
            let end = start + chrono::Duration::minutes(length as i64);
            let event = CalendarEvent::timed("p", "Prop", start, end);

            let mut narrow = TimeWindow::new();
            prop_assert!(narrow.set_range(start_hour, end_hour));
            let mut wide = TimeWindow::new();
            prop_assert!(wide.set_range(start_hour.min(widen_start), end_hour.max(widen_end)));

            if is_visible(&event, &narrow) {
                prop_assert!(is_visible(&event, &wide));
            }
        }
    }
}
