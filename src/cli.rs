use std::{
    env,
    io::{self, Write},
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use anyhow::Context;
use chrono::NaiveDate;
use serde::Serialize;

use weekgrid::{
    CalendarEvent, WeekLayout, WeekViewController,
    app::PositionedEvent,
    week::{DayColumn, Preset},
};

pub const USAGE: &str =
    "Usage: weekgrid [--sample] [--events FILE.json] [--date YYYY-MM-DD] [--preset full|business|evening|morning] [--mobile] [--agenda | --json]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Agenda,
    Json,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub mode: CliMode,
    pub sample: bool,
    pub events_file: Option<PathBuf>,
    pub date: Option<NaiveDate>,
    pub preset: Option<Preset>,
    pub mobile: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            mode: CliMode::Interactive,
            sample: false,
            events_file: None,
            date: None,
            preset: None,
            mobile: false,
        }
    }
}

pub fn parse_cli_mode() -> Result<CliOptions, String> {
    parse_args(env::args().skip(1))
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--sample" => options.sample = true,
            "--mobile" => options.mobile = true,
            "--agenda" => options.mode = exclusive_mode(options.mode, CliMode::Agenda)?,
            "--json" => options.mode = exclusive_mode(options.mode, CliMode::Json)?,
            "--events" => {
                let value = args.next().ok_or("--events needs a file path")?;
                options.events_file = Some(PathBuf::from(value));
            }
            "--date" => {
                let value = args.next().ok_or("--date needs a value (YYYY-MM-DD)")?;
                let date = NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                    .map_err(|_| format!("Invalid date '{}'. Use YYYY-MM-DD.", value))?;
                options.date = Some(date);
            }
            "--preset" => {
                let value = args.next().ok_or("--preset needs a name")?;
                options.preset = Some(value.parse::<Preset>().map_err(|e| e.to_string())?);
            }
            "--help" | "-h" => {
                options.mode = CliMode::Help;
                return Ok(options);
            }
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    Ok(options)
}

fn exclusive_mode(current: CliMode, requested: CliMode) -> Result<CliMode, String> {
    if current == CliMode::Interactive || current == requested {
        Ok(requested)
    } else {
        Err("--agenda and --json cannot be combined".to_string())
    }
}

/// Reads a JSON array of events.
pub fn load_events(path: &Path) -> anyhow::Result<Vec<CalendarEvent>> {
    let content = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let events: Vec<CalendarEvent> =
        serde_json::from_str(&content).with_context(|| format!("parsing events from {}", path.display()))?;
    tracing::info!("loaded {} event(s) from {}", events.len(), path.display());
    Ok(events)
}

pub fn run_agenda_mode(controller: &WeekViewController, events: &[CalendarEvent]) -> Result<(), io::Error> {
    let layout = controller.layout(events);
    let agenda = format_agenda_text(&layout);
    display_with_pager(&agenda)
}

#[derive(Serialize)]
struct WeekSnapshot<'a> {
    label: &'a str,
    start_hour: u32,
    end_hour: u32,
    show_full_day: bool,
    days: Vec<DaySnapshot<'a>>,
    hidden_event_ids: Vec<&'a str>,
    hidden_warning: Option<String>,
    current_time_position: Option<f64>,
    events: Vec<PositionedEvent<'a>>,
}

#[derive(Serialize)]
struct DaySnapshot<'a> {
    #[serde(flatten)]
    column: DayColumn,
    all_day_event_ids: Vec<&'a str>,
    overlap_groups: Vec<Vec<&'a str>>,
}

pub fn run_json_mode(controller: &WeekViewController, events: &[CalendarEvent]) -> anyhow::Result<()> {
    let layout = controller.layout(events);
    let json = week_snapshot_json(controller, &layout)?;
    println!("{}", json);
    Ok(())
}

fn week_snapshot_json(controller: &WeekViewController, layout: &WeekLayout<'_>) -> serde_json::Result<String> {
    let window = controller.state().window;
    let snapshot = WeekSnapshot {
        label: &layout.label,
        start_hour: window.start_hour(),
        end_hour: window.end_hour(),
        show_full_day: window.show_full_day(),
        days: layout
            .days
            .iter()
            .map(|day| DaySnapshot {
                column: day.column,
                all_day_event_ids: day.all_day.iter().map(|event| event.id.as_str()).collect(),
                overlap_groups: day.groups.iter().map(|group| group.ids()).collect(),
            })
            .collect(),
        hidden_event_ids: layout.hidden.iter().map(|event| event.id.as_str()).collect(),
        hidden_warning: layout.hidden_warning(),
        current_time_position: layout.current_time_position,
        events: controller.place(layout),
    };
    serde_json::to_string_pretty(&snapshot)
}

fn format_agenda_text(layout: &WeekLayout<'_>) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Week of {} ({:02}:00-{:02}:59)",
        layout.label,
        layout.hours.start(),
        layout.hours.end()
    ));
    if let Some(warning) = layout.hidden_warning() {
        lines.push(warning);
    }

    for day in &layout.days {
        lines.push(String::new());
        let marker = if day.column.is_today { " (today)" } else { "" };
        lines.push(format!("{}{}", day.column.date.format("%a %b %-d"), marker));

        if day.all_day.is_empty() && day.groups.is_empty() {
            lines.push("  No events scheduled.".to_string());
            continue;
        }
        for event in &day.all_day {
            lines.push(format!("  {}", build_agenda_line(event)));
        }
        for group in &day.groups {
            for (slot, event) in group.slots() {
                let mut line = format!("  {}", build_agenda_line(event));
                if group.len() > 1 {
                    line.push_str(&format!("  [{}/{}]", slot + 1, group.len()));
                }
                lines.push(line);
            }
        }
    }

    lines.join("\n") + "\n"
}

fn build_agenda_line(event: &CalendarEvent) -> String {
    let mut line = format!("{:<13} {}", event.time_label(), event.title);
    if let Some(location) = &event.location
        && !location.is_empty()
    {
        line.push_str(&format!(" @ {}", location));
    }
    line
}

fn display_with_pager(text: &str) -> Result<(), io::Error> {
    let pager_value = env::var("PAGER").unwrap_or_else(|_| "less".to_string());
    let mut parts = pager_value.split_whitespace();
    let Some(cmd) = parts.next() else {
        print!("{text}");
        return Ok(());
    };
    let args: Vec<&str> = parts.collect();

    match Command::new(cmd).args(&args).stdin(Stdio::piped()).spawn() {
        Ok(mut child) => {
            if let Some(stdin) = child.stdin.as_mut() {
                stdin.write_all(text.as_bytes())?;
            }
            let _ = child.wait();
        }
        Err(_) => {
            print!("{text}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::{NaiveDateTime, Weekday};
    use weekgrid::clock::Clock;
    use weekgrid::timers::TimerSettings;
    use weekgrid::week::GridMetrics;

    struct FixedClock(NaiveDateTime);

    impl Clock for FixedClock {
        fn now(&self) -> NaiveDateTime {
            self.0
        }
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn controller() -> WeekViewController {
        let now = NaiveDate::from_ymd_opt(2025, 1, 8)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        WeekViewController::new(
            now.date(),
            Weekday::Mon,
            GridMetrics::default(),
            TimerSettings::default(),
            Arc::new(FixedClock(now)),
        )
    }

    fn event(id: &str, day: u32, start: u32, end: u32) -> CalendarEvent {
        let date = NaiveDate::from_ymd_opt(2025, 1, day).unwrap();
        CalendarEvent::timed(
            id,
            id,
            date.and_hms_opt(start, 0, 0).unwrap(),
            date.and_hms_opt(end, 0, 0).unwrap(),
        )
    }

    #[test]
    fn no_arguments_start_the_interactive_view() {
        assert_eq!(parse_args(args(&[])).unwrap(), CliOptions::default());
    }

    #[test]
    fn flags_combine() {
        let options = parse_args(args(&["--sample", "--date", "2025-01-08", "--preset", "Business", "--mobile", "--json"])).unwrap();

        assert_eq!(options.mode, CliMode::Json);
        assert!(options.sample && options.mobile);
        assert_eq!(options.date, NaiveDate::from_ymd_opt(2025, 1, 8));
        assert_eq!(options.preset, Some(Preset::Business));
    }

    #[test]
    fn events_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(
            &path,
            r##"[
                {"id": "a", "title": "Standup", "start": "2025-01-06T09:00:00", "end": "2025-01-06T09:30:00"},
                {"id": "b", "title": "Holiday", "start": "2025-01-10T00:00:00", "end": "2025-01-10T00:00:00", "all_day": true, "color": "#7986cb"}
            ]"##,
        )
        .unwrap();

        let options = parse_args(args(&["--events", path.to_str().unwrap()])).unwrap();
        let events = load_events(options.events_file.as_deref().unwrap()).unwrap();

        assert_eq!(events.len(), 2);
        assert!(!events[0].all_day);
        assert_eq!(events[1].color.as_deref(), Some("#7986cb"));
    }

    #[test]
    fn unreadable_events_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(load_events(&path).is_err());
        assert!(load_events(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn bad_values_are_reported() {
        assert!(parse_args(args(&["--date", "2025/01/08"])).unwrap_err().contains("YYYY-MM-DD"));
        assert!(parse_args(args(&["--date"])).is_err());
        assert!(parse_args(args(&["--preset", "night"])).is_err());
        assert!(parse_args(args(&["--bogus"])).unwrap_err().contains("--bogus"));
    }

    #[test]
    fn agenda_and_json_are_exclusive() {
        assert!(parse_args(args(&["--agenda", "--json"])).is_err());
        assert_eq!(parse_args(args(&["--agenda", "--agenda"])).unwrap().mode, CliMode::Agenda);
    }

    #[test]
    fn help_stops_parsing() {
        assert_eq!(parse_args(args(&["--help", "--bogus"])).unwrap().mode, CliMode::Help);
    }

    #[test]
    fn agenda_lists_days_slots_and_warning() {
        let mut controller = controller();
        controller.apply_preset(Preset::Business);
        let events = vec![
            event("standup", 6, 9, 10),
            event("review", 6, 9, 11),
            event("run", 7, 5, 6),
            CalendarEvent::all_day("holiday", "Holiday", NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()),
        ];

        let text = format_agenda_text(&controller.layout(&events));

        assert!(text.starts_with("Week of Jan 6 - Jan 12, 2025 (08:00-18:59)\n"));
        assert!(text.contains("Warning: 1 event is outside the selected time range"));
        assert!(text.contains("09:00-10:00   standup  [1/2]"));
        assert!(text.contains("09:00-11:00   review  [2/2]"));
        assert!(text.contains("Wed Jan 8 (today)"));
        assert!(text.contains("All Day       Holiday"));
        assert!(!text.contains("05:00-06:00"));
    }

    #[test]
    fn json_snapshot_carries_positions() {
        let controller = controller();
        let events = vec![event("standup", 6, 9, 10)];
        let layout = controller.layout(&events);

        let json: serde_json::Value = serde_json::from_str(&week_snapshot_json(&controller, &layout).unwrap()).unwrap();

        assert_eq!(json["label"], "Jan 6 - Jan 12, 2025");
        assert_eq!(json["show_full_day"], true);
        assert_eq!(json["days"].as_array().unwrap().len(), 7);
        assert_eq!(json["days"][0]["overlap_groups"][0][0], "standup");
        assert_eq!(json["events"][0]["geometry"]["top"], 540.0);
        assert_eq!(json["current_time_position"], 540.0);
    }
}
