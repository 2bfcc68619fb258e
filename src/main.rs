use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use weekgrid::{
    WeekViewController,
    clock::{Clock, SystemClock},
    config::{APP_DIR, Config},
    week::LayoutMode,
};

mod cli;
use cli::{CliMode, USAGE, load_events, parse_cli_mode, run_agenda_mode, run_json_mode};
mod tui;
use tui::{run_tui, sample_events};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();

    let options = match parse_cli_mode() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{}", USAGE);
            return Ok(());
        }
    };
    if options.mode == CliMode::Help {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = Config::load_or_create().context("loading configuration")?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let mut controller = WeekViewController::from_config(&config, options.date, clock)
        .context("building week view from configuration")?;

    if let Some(preset) = options.preset {
        controller.apply_preset(preset);
    }
    if options.mobile {
        controller.set_layout_mode(LayoutMode::Mobile);
    }

    let mut events = match &options.events_file {
        Some(path) => load_events(path)?,
        None => Vec::new(),
    };
    if options.sample {
        events.extend(sample_events::week_of(controller.state().navigator.week_start()));
    }
    tracing::info!("showing {} with {} event(s)", controller.state().navigator.range_label(), events.len());

    match options.mode {
        CliMode::Agenda => run_agenda_mode(&controller, &events)?,
        CliMode::Json => run_json_mode(&controller, &events)?,
        CliMode::Interactive => run_tui(controller, events, &config).await?,
        CliMode::Help => {}
    }
    Ok(())
}

fn setup_logging() {
    let log_dir = dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| std::path::PathBuf::from("."));

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "weekgrid.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_env("WEEKGRID_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("weekgrid started");
}
