use std::ops::RangeInclusive;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use serde::Serialize;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::calendar::CalendarEvent;
use crate::clock::Clock;
use crate::config::{Config, ConfigError};
use crate::timers::{TimerSettings, ViewSignal, ViewTimers};
use crate::week::geometry::{self, EventGeometry, GridMetrics, LayoutMode};
use crate::week::navigator::{DayColumn, WeekNavigator};
use crate::week::overlap::{OverlapGroup, group_overlapping};
use crate::week::time_window::{HourInput, Preset, TimeWindow, UnknownPreset, parse_hour_input};
use crate::week::visibility;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourField {
    Start,
    End,
}

impl HourField {
    pub fn label(self) -> &'static str {
        match self {
            HourField::Start => "From",
            HourField::End => "To",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Idle,
    Editing(HourField),
}

/// Everything the week view keeps between renders. Typed hour text lives in
/// `start_input`/`end_input` and only reaches `window` once it parses and
/// keeps `start <= end`.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekViewState {
    pub navigator: WeekNavigator,
    pub window: TimeWindow,
    pub metrics: GridMetrics,
    pub start_input: String,
    pub end_input: String,
    pub edit: EditState,
    pub now: NaiveDateTime,
}

/// One day column of a computed week.
#[derive(Debug, Clone, PartialEq)]
pub struct DayLayout<'a> {
    pub column: DayColumn,
    pub all_day: Vec<&'a CalendarEvent>,
    pub groups: Vec<OverlapGroup<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekLayout<'a> {
    pub label: String,
    pub hours: RangeInclusive<u32>,
    pub days: Vec<DayLayout<'a>>,
    pub hidden: Vec<&'a CalendarEvent>,
    pub current_time_position: Option<f64>,
}

impl WeekLayout<'_> {
    pub fn hidden_warning(&self) -> Option<String> {
        visibility::hidden_events_warning(self.hidden.len())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedEvent<'a> {
    pub event: &'a CalendarEvent,
    pub day_index: usize,
    pub geometry: EventGeometry,
}

impl WeekViewState {
    pub fn new(pivot: NaiveDate, starts_on: Weekday, metrics: GridMetrics, now: NaiveDateTime) -> Self {
        let window = TimeWindow::new();
        Self {
            navigator: WeekNavigator::new(pivot, starts_on),
            window,
            metrics,
            start_input: window.start_hour().to_string(),
            end_input: window.end_hour().to_string(),
            edit: EditState::Idle,
            now,
        }
    }

    pub fn input(&self, field: HourField) -> &str {
        match field {
            HourField::Start => &self.start_input,
            HourField::End => &self.end_input,
        }
    }

    fn input_mut(&mut self, field: HourField) -> &mut String {
        match field {
            HourField::Start => &mut self.start_input,
            HourField::End => &mut self.end_input,
        }
    }

    fn committed(&self, field: HourField) -> u32 {
        match field {
            HourField::Start => self.window.start_hour(),
            HourField::End => self.window.end_hour(),
        }
    }

    fn set_bound(&mut self, field: HourField, hour: u32) -> bool {
        match field {
            HourField::Start => self.window.set_start(hour),
            HourField::End => self.window.set_end(hour),
        }
    }

    pub fn apply_preset(&mut self, preset: Preset) {
        self.window.apply_preset(preset);
        self.start_input = self.window.start_hour().to_string();
        self.end_input = self.window.end_hour().to_string();
        self.edit = EditState::Idle;
        tracing::debug!("applied {} preset", preset);
    }

    pub fn begin_edit(&mut self, field: HourField) {
        self.edit = EditState::Editing(field);
    }

    /// Live keystroke into an hour field. The typed text is kept as-is; the
    /// window follows it only when the text is a usable hour. Returns whether
    /// the window changed.
    pub fn edit_input(&mut self, field: HourField, value: &str) -> bool {
        let before = self.window;
        *self.input_mut(field) = value.to_string();
        self.edit = EditState::Editing(field);

        if let HourInput::Hour(hour) = parse_hour_input(value) {
            self.set_bound(field, hour);
        }
        self.window != before
    }

    /// Leaving an hour field. The field text snaps back to the committed
    /// bound, which is the typed hour when it was accepted.
    pub fn commit_input(&mut self, field: HourField) -> bool {
        let before = self.window;
        self.edit = EditState::Idle;

        match parse_hour_input(self.input(field)) {
            HourInput::Hour(hour) => {
                if !self.set_bound(field, hour) {
                    tracing::debug!("rejected {} hour {}: outside {:?}", field.label(), hour, self.window.hours());
                }
            }
            HourInput::Empty | HourInput::Invalid => {
                tracing::debug!("reverted unparsable {} input {:?}", field.label(), self.input(field));
            }
        }

        *self.input_mut(field) = self.committed(field).to_string();
        self.window != before
    }

    pub fn tick(&mut self, now: NaiveDateTime) {
        self.now = now;
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }

    pub fn current_time_position(&self) -> Option<f64> {
        geometry::current_time_position(self.now.time(), &self.window, self.metrics.hour_height)
    }

    pub fn geometry(
        &self,
        event: &CalendarEvent,
        column: &DayColumn,
        cluster_size: usize,
        slot_index: usize,
    ) -> EventGeometry {
        geometry::event_geometry(event, column, &self.window, &self.metrics, cluster_size, slot_index)
    }

    /// Derives the whole week from `events`. Nothing is cached; the same
    /// state and events always give the same layout.
    pub fn layout<'a>(&self, events: &'a [CalendarEvent]) -> WeekLayout<'a> {
        let days = self
            .navigator
            .columns(self.today())
            .into_iter()
            .map(|column| {
                let timed = visibility::timed_events_for_day(events, column.date, &self.window);
                DayLayout {
                    column,
                    all_day: visibility::all_day_events_for_day(events, column.date),
                    groups: group_overlapping(&timed),
                }
            })
            .collect();

        WeekLayout {
            label: self.navigator.range_label(),
            hours: self.window.hours(),
            days,
            hidden: visibility::hidden_events(events, &self.window),
            current_time_position: self.current_time_position(),
        }
    }

    /// Geometry for every grouped event of `layout`, day by day.
    pub fn place<'a>(&self, layout: &WeekLayout<'a>) -> Vec<PositionedEvent<'a>> {
        let mut placed = Vec::new();
        for day in &layout.days {
            for group in &day.groups {
                for (slot, event) in group.slots() {
                    placed.push(PositionedEvent {
                        event,
                        day_index: day.column.index,
                        geometry: self.geometry(event, &day.column, group.len(), slot),
                    });
                }
            }
        }
        placed
    }
}

/// Owns the week view state and the timers it starts. Mounting starts the
/// clock tick and the deferred auto-scroll; `dispose` (or dropping the
/// controller) aborts both.
pub struct WeekViewController {
    state: WeekViewState,
    clock: Arc<dyn Clock>,
    settings: TimerSettings,
    timers: Option<ViewTimers>,
    scroll_request: Option<f64>,
}

impl WeekViewController {
    pub fn new(
        pivot: NaiveDate,
        starts_on: Weekday,
        metrics: GridMetrics,
        settings: TimerSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let now = clock.now();
        Self {
            state: WeekViewState::new(pivot, starts_on, metrics, now),
            clock,
            settings,
            timers: None,
            scroll_request: None,
        }
    }

    pub fn from_config(
        config: &Config,
        pivot: Option<NaiveDate>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        let starts_on = config.week_start()?;
        let pivot = pivot.unwrap_or_else(|| clock.now().date());
        let mut controller = Self::new(
            pivot,
            starts_on,
            config.grid_metrics(),
            config.timer_settings(),
            clock,
        );
        controller.state.apply_preset(config.view.default_preset);
        Ok(controller)
    }

    pub fn state(&self) -> &WeekViewState {
        &self.state
    }

    pub fn is_mounted(&self) -> bool {
        self.timers.is_some()
    }

    /// Starts the view's timers. Must be called from within a tokio runtime.
    pub fn mount(&mut self) -> UnboundedReceiver<ViewSignal> {
        self.dispose();
        let (mut timers, signals) = ViewTimers::new();
        timers.start_clock(self.settings.tick_interval);
        self.timers = Some(timers);
        self.arm_auto_scroll();
        tracing::debug!("week view mounted for {}", self.state.navigator.range_label());
        signals
    }

    pub fn dispose(&mut self) {
        if let Some(mut timers) = self.timers.take() {
            timers.cancel_all();
            tracing::debug!("week view timers cancelled");
        }
    }

    pub fn handle_signal(&mut self, signal: ViewSignal) {
        match signal {
            ViewSignal::Tick => self.tick(),
            ViewSignal::AutoScroll(target) => self.scroll_request = Some(target),
        }
    }

    pub fn tick(&mut self) {
        self.state.tick(self.clock.now());
    }

    /// Scroll offset delivered by the auto-scroll timer, handed out once.
    pub fn take_scroll_request(&mut self) -> Option<f64> {
        self.scroll_request.take()
    }

    fn arm_auto_scroll(&mut self) {
        let Some(timers) = self.timers.as_mut() else {
            return;
        };
        let target = geometry::auto_scroll_target(
            self.clock.now().time(),
            &self.state.window,
            self.state.metrics.hour_height,
            self.settings.auto_scroll_offset,
        );
        match target {
            Some(target) => timers.schedule_auto_scroll(self.settings.auto_scroll_delay, target),
            None => timers.cancel_auto_scroll(),
        }
    }

    fn after_window_change(&mut self, changed: bool) -> bool {
        if changed {
            self.arm_auto_scroll();
        }
        changed
    }

    pub fn apply_preset(&mut self, preset: Preset) {
        let before = self.state.window;
        self.state.apply_preset(preset);
        self.after_window_change(self.state.window != before);
    }

    /// Named preset from a toggle or the command line. Unknown names leave
    /// the window alone.
    pub fn apply_preset_named(&mut self, name: &str) -> Result<(), UnknownPreset> {
        let preset = name.parse::<Preset>()?;
        self.apply_preset(preset);
        Ok(())
    }

    pub fn begin_edit(&mut self, field: HourField) {
        self.state.begin_edit(field);
    }

    pub fn edit_input(&mut self, field: HourField, value: &str) -> bool {
        let changed = self.state.edit_input(field, value);
        self.after_window_change(changed)
    }

    pub fn commit_input(&mut self, field: HourField) -> bool {
        let changed = self.state.commit_input(field);
        self.after_window_change(changed)
    }

    pub fn next_week(&mut self) {
        self.state.navigator.next();
        tracing::debug!("next week: {}", self.state.navigator.range_label());
    }

    pub fn prev_week(&mut self) {
        self.state.navigator.prev();
        tracing::debug!("previous week: {}", self.state.navigator.range_label());
    }

    pub fn go_to_today(&mut self) {
        self.tick();
        let today = self.state.today();
        self.state.navigator.set_pivot(today);
    }

    pub fn set_layout_mode(&mut self, layout: LayoutMode) {
        self.state.metrics.layout = layout;
    }

    pub fn toggle_layout_mode(&mut self) {
        let layout = self.state.metrics.layout.toggled();
        self.set_layout_mode(layout);
    }

    pub fn set_hour_height(&mut self, hour_height: f64) {
        if hour_height > 0.0 && hour_height != self.state.metrics.hour_height {
            self.state.metrics.hour_height = hour_height;
            self.arm_auto_scroll();
        }
    }

    pub fn layout<'a>(&self, events: &'a [CalendarEvent]) -> WeekLayout<'a> {
        self.state.layout(events)
    }

    pub fn place<'a>(&self, layout: &WeekLayout<'a>) -> Vec<PositionedEvent<'a>> {
        self.state.place(layout)
    }

    pub fn geometry(
        &self,
        event: &CalendarEvent,
        column: &DayColumn,
        cluster_size: usize,
        slot_index: usize,
    ) -> EventGeometry {
        self.state.geometry(event, column, cluster_size, slot_index)
    }
}
