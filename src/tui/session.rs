use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc::UnboundedReceiver;

use weekgrid::{
    CalendarEvent, WeekViewController,
    config::Config,
    input::{self, KeyOutcome},
    timers::ViewSignal,
    ui::{theme::Theme, week_grid},
};

use crate::tui::presentation::ui;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Terminal-side state that the week view itself does not own.
pub struct ViewPort {
    pub theme: Theme,
    pub rows_per_hour: u16,
    pub scroll_rows: u16,
    pub visible_rows: u16,
}

impl ViewPort {
    pub fn new(config: &Config) -> Self {
        Self {
            theme: Theme::get_by_name(&config.ui.theme),
            rows_per_hour: config.ui.rows_per_hour.max(1),
            scroll_rows: 0,
            visible_rows: 0,
        }
    }

    fn scroll_by(&mut self, delta: i32, hour_rows: u32) {
        let max = week_grid::max_scroll(hour_rows, self.rows_per_hour, self.visible_rows);
        let target = (self.scroll_rows as i32 + delta).clamp(0, max as i32);
        self.scroll_rows = target as u16;
    }

    fn scroll_to(&mut self, offset: f64, hour_height: f64, hour_rows: u32) {
        let rows = week_grid::scroll_rows_for(offset, hour_height, self.rows_per_hour);
        let max = week_grid::max_scroll(hour_rows, self.rows_per_hour, self.visible_rows);
        self.scroll_rows = rows.min(max);
    }
}

pub async fn run_tui(
    mut controller: WeekViewController,
    events: Vec<CalendarEvent>,
    config: &Config,
) -> Result<(), io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut viewport = ViewPort::new(config);
    let mut signals = controller.mount();

    let res = run_app(&mut terminal, &mut controller, &events, &mut viewport, &mut signals);

    controller.dispose();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("week view stopped: {}", err);
        println!("Error: {:?}", err);
    }

    tracing::info!("weekgrid exited");
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    controller: &mut WeekViewController,
    events: &[CalendarEvent],
    viewport: &mut ViewPort,
    signals: &mut UnboundedReceiver<ViewSignal>,
) -> io::Result<()> {
    loop {
        while let Ok(signal) = signals.try_recv() {
            controller.handle_signal(signal);
        }
        let hour_rows = controller.state().window.row_count();
        if let Some(offset) = controller.take_scroll_request() {
            viewport.scroll_to(offset, controller.state().metrics.hour_height, hour_rows);
        }

        terminal.draw(|f| ui(f, controller, events, viewport))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        if let TermEvent::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match input::handle_key(key.code, controller) {
                KeyOutcome::Quit => return Ok(()),
                KeyOutcome::ScrollBy(delta) => {
                    viewport.scroll_by(delta, controller.state().window.row_count());
                }
                KeyOutcome::Continue => {}
            }
        }
    }
}
