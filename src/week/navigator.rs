use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;

pub const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub index: usize,
    pub is_today: bool,
    pub is_weekend: bool,
}

/// Maps a week-start index (0 = Sunday .. 6 = Saturday) to a weekday.
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

pub fn week_start(date: NaiveDate, starts_on: Weekday) -> NaiveDate {
    let days_back = (date.weekday().num_days_from_sunday() + 7 - starts_on.num_days_from_sunday()) % 7;
    date.checked_sub_days(Days::new(days_back as u64))
        .unwrap_or(date)
}

pub fn week_end(date: NaiveDate, starts_on: Weekday) -> NaiveDate {
    let start = week_start(date, starts_on);
    start.checked_add_days(Days::new(6)).unwrap_or(start)
}

pub fn days_in_week(date: NaiveDate, starts_on: Weekday) -> [NaiveDate; DAYS_PER_WEEK] {
    let start = week_start(date, starts_on);
    std::array::from_fn(|offset| {
        start
            .checked_add_days(Days::new(offset as u64))
            .unwrap_or(NaiveDate::MAX)
    })
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekNavigator {
    pivot: NaiveDate,
    starts_on: Weekday,
}

impl WeekNavigator {
    pub fn new(pivot: NaiveDate, starts_on: Weekday) -> Self {
        Self { pivot, starts_on }
    }

    pub fn pivot(&self) -> NaiveDate {
        self.pivot
    }

    pub fn set_pivot(&mut self, pivot: NaiveDate) {
        self.pivot = pivot;
    }

    pub fn starts_on(&self) -> Weekday {
        self.starts_on
    }

    pub fn week_start(&self) -> NaiveDate {
        week_start(self.pivot, self.starts_on)
    }

    pub fn week_end(&self) -> NaiveDate {
        week_end(self.pivot, self.starts_on)
    }

    pub fn days_in_week(&self) -> [NaiveDate; DAYS_PER_WEEK] {
        days_in_week(self.pivot, self.starts_on)
    }

    pub fn columns(&self, today: NaiveDate) -> [DayColumn; DAYS_PER_WEEK] {
        let days = self.days_in_week();
        std::array::from_fn(|index| DayColumn {
            date: days[index],
            index,
            is_today: days[index] == today,
            is_weekend: is_weekend(days[index]),
        })
    }

    pub fn next(&mut self) {
        if let Some(pivot) = self.pivot.checked_add_days(Days::new(DAYS_PER_WEEK as u64)) {
            self.pivot = pivot;
        }
    }

    pub fn prev(&mut self) {
        if let Some(pivot) = self.pivot.checked_sub_days(Days::new(DAYS_PER_WEEK as u64)) {
            self.pivot = pivot;
        }
    }

    /// Header label such as `Jan 6 - Jan 12, 2025`.
    pub fn range_label(&self) -> String {
        format!(
            "{} - {}",
            self.week_start().format("%b %-d"),
            self.week_end().format("%b %-d, %Y")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn week_start_index_maps_sunday_first() {
        assert_eq!(weekday_from_index(0), Some(Weekday::Sun));
        assert_eq!(weekday_from_index(1), Some(Weekday::Mon));
        assert_eq!(weekday_from_index(6), Some(Weekday::Sat));
        assert_eq!(weekday_from_index(7), None);
    }

    #[test]
    fn monday_week_of_wednesday_starts_previous_monday() {
        assert_eq!(week_start(date(2025, 1, 15), Weekday::Mon), date(2025, 1, 13));
        assert_eq!(week_end(date(2025, 1, 15), Weekday::Mon), date(2025, 1, 19));
    }

    #[test]
    fn monday_week_of_sunday_starts_six_days_earlier() {
        assert_eq!(week_start(date(2025, 1, 19), Weekday::Mon), date(2025, 1, 13));
    }

    #[test]
    fn sunday_week_of_sunday_starts_same_day() {
        assert_eq!(week_start(date(2025, 1, 19), Weekday::Sun), date(2025, 1, 19));
        assert_eq!(week_end(date(2025, 1, 19), Weekday::Sun), date(2025, 1, 25));
    }

    #[test]
    fn next_week_from_january_sixth() {
        let mut navigator = WeekNavigator::new(date(2025, 1, 6), Weekday::Mon);

        navigator.next();

        assert_eq!(navigator.pivot(), date(2025, 1, 13));
        let days = navigator.days_in_week();
        assert_eq!(days[0], date(2025, 1, 13));
        assert_eq!(days[6], date(2025, 1, 19));
    }

    #[test]
    fn prev_week_crosses_year_boundary() {
        let mut navigator = WeekNavigator::new(date(2025, 1, 2), Weekday::Mon);

        navigator.prev();

        assert_eq!(navigator.pivot(), date(2024, 12, 26));
        assert_eq!(navigator.week_start(), date(2024, 12, 23));
    }

    #[test]
    fn columns_mark_today_and_weekend() {
        let navigator = WeekNavigator::new(date(2025, 1, 8), Weekday::Mon);

        let columns = navigator.columns(date(2025, 1, 8));

        let today: Vec<usize> = columns.iter().filter(|c| c.is_today).map(|c| c.index).collect();
        let weekend: Vec<usize> = columns.iter().filter(|c| c.is_weekend).map(|c| c.index).collect();
        assert_eq!(today, vec![2]);
        assert_eq!(weekend, vec![5, 6]);
    }

    #[test]
    fn range_label_spans_the_week() {
        let navigator = WeekNavigator::new(date(2025, 1, 8), Weekday::Mon);

        assert_eq!(navigator.range_label(), "Jan 6 - Jan 12, 2025");
    }

    proptest! {
        #[test]
        fn week_has_seven_consecutive_days(offset in -100_000i64..100_000, starts in 0u8..7) {
            let pivot = date(2000, 1, 1) + chrono::Duration::days(offset);
            let starts_on = weekday_from_index(starts).unwrap();

            let days = days_in_week(pivot, starts_on);

            prop_assert_eq!(days.len(), 7);
            prop_assert_eq!(days[0].weekday(), starts_on);
            prop_assert!(days.contains(&pivot));
            for pair in days.windows(2) {
                prop_assert_eq!(pair[1] - pair[0], chrono::Duration::days(1));
            }
        }

        #[test]
        fn next_then_prev_returns_to_pivot(offset in -100_000i64..100_000, forward_first in any::<bool>()) {
            let pivot = date(2000, 1, 1) + chrono::Duration::days(offset);
            let mut navigator = WeekNavigator::new(pivot, Weekday::Mon);

            if forward_first {
                navigator.next();
                navigator.prev();
            } else {
                navigator.prev();
                navigator.next();
            }

            prop_assert_eq!(navigator.pivot(), pivot);
        }
    }
}
