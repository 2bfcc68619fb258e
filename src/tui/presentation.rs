use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use weekgrid::{
    CalendarEvent, HourField, WeekLayout, WeekViewController,
    app::{EditState, PositionedEvent},
    ui::{
        theme::{Theme, parse_hex_color},
        week_grid::{self, CellScale},
    },
    week::{LayoutMode, Preset, navigator::DAYS_PER_WEEK},
};

use crate::tui::session::ViewPort;

const LABEL_WIDTH: u16 = 7;

pub fn ui(f: &mut Frame, controller: &WeekViewController, events: &[CalendarEvent], viewport: &mut ViewPort) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.size());

    let layout = controller.layout(events);
    let placed = controller.place(&layout);
    let theme = &viewport.theme;

    let title = Paragraph::new(format!("weekgrid - {}", layout.label))
        .style(Style::default().fg(theme.title).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    render_controls(f, controller, theme, chunks[1]);

    let warning = layout.hidden_warning().unwrap_or_default();
    f.render_widget(
        Paragraph::new(warning).style(Style::default().fg(theme.warning)),
        chunks[2],
    );

    render_weekday_header(f, &layout, theme, chunks[3]);
    render_all_day_strip(f, &layout, theme, chunks[4]);
    render_grid(f, controller, &layout, &placed, viewport, chunks[5]);
    render_status(f, controller, &viewport.theme, chunks[6]);
}

fn split_label_column(area: Rect) -> (Rect, Rect) {
    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(LABEL_WIDTH), Constraint::Min(0)])
        .split(area);
    (parts[0], parts[1])
}

/// Day column `index` of `days_area`, using the same rounding as event
/// placement so blocks line up with their column.
fn column_rect(days_area: Rect, index: usize) -> Rect {
    let column = days_area.width as f64 / DAYS_PER_WEEK as f64;
    let x = (index as f64 * column).round() as u16;
    let next = ((index + 1) as f64 * column).round() as u16;
    Rect {
        x: days_area.x + x,
        y: days_area.y,
        width: next.saturating_sub(x),
        height: days_area.height,
    }
}

fn render_controls(f: &mut Frame, controller: &WeekViewController, theme: &Theme, area: Rect) {
    let state = controller.state();
    let active = Preset::matching(&state.window);

    let mut spans = vec![Span::raw("Presets:")];
    for (n, preset) in Preset::ALL.into_iter().enumerate() {
        let style = if active == Some(preset) {
            Style::default().bg(theme.toggle_on).fg(Color::Black).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {} {} ", n + 1, preset.label()), style));
    }

    for field in [HourField::Start, HourField::End] {
        let style = if state.edit == EditState::Editing(field) {
            Style::default().fg(theme.input_focus).add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(theme.input_focus)
        };
        spans.push(Span::raw(format!("  {}: ", field.label())));
        spans.push(Span::styled(format!("[{:>2}]", state.input(field)), style));
    }

    let mode = match state.metrics.layout {
        LayoutMode::Desktop => "desktop",
        LayoutMode::Mobile => "mobile",
    };
    spans.push(Span::styled(format!("  ({})", mode), Style::default().fg(theme.hour_label)));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_weekday_header(f: &mut Frame, layout: &WeekLayout<'_>, theme: &Theme, area: Rect) {
    let (_, days_area) = split_label_column(area);

    for day in &layout.days {
        let column = &day.column;
        let style = if column.is_today {
            Style::default().fg(theme.today).add_modifier(Modifier::BOLD)
        } else if column.is_weekend {
            Style::default().fg(theme.weekend)
        } else {
            Style::default().fg(theme.weekday_header)
        };
        let text = format!(" {}", column.date.format("%a %-d"));
        f.render_widget(Paragraph::new(text).style(style), column_rect(days_area, column.index));
    }
}

fn render_all_day_strip(f: &mut Frame, layout: &WeekLayout<'_>, theme: &Theme, area: Rect) {
    let (label_area, days_area) = split_label_column(area);
    f.render_widget(
        Paragraph::new("all-day").style(Style::default().fg(theme.hour_label)),
        label_area,
    );

    for day in &layout.days {
        let Some(first) = day.all_day.first() else { continue };
        let mut text = format!(" {}", first.title);
        if day.all_day.len() > 1 {
            text.push_str(&format!(" +{}", day.all_day.len() - 1));
        }
        f.render_widget(
            Paragraph::new(text).style(Style::default().fg(theme.all_day)),
            column_rect(days_area, day.column.index),
        );
    }
}

fn render_grid(
    f: &mut Frame,
    controller: &WeekViewController,
    layout: &WeekLayout<'_>,
    placed: &[PositionedEvent<'_>],
    viewport: &mut ViewPort,
    area: Rect,
) {
    let (label_area, days_area) = split_label_column(area);
    viewport.visible_rows = days_area.height;
    let state = controller.state();
    let theme = &viewport.theme;
    let scale = CellScale {
        rows_per_hour: viewport.rows_per_hour,
        scroll_rows: viewport.scroll_rows,
    };

    let first_hour = *layout.hours.start();
    let last_hour = *layout.hours.end();
    let labels: Vec<Line> = (0..label_area.height)
        .map(|row| {
            let absolute = row as u32 + scale.scroll_rows as u32;
            let hour = first_hour + absolute / scale.rows_per_hour as u32;
            if absolute % scale.rows_per_hour as u32 == 0 && hour <= last_hour {
                Line::from(Span::styled(format!("{:02}:00", hour), Style::default().fg(theme.hour_label)))
            } else {
                Line::from("")
            }
        })
        .collect();
    f.render_widget(Paragraph::new(labels), label_area);

    for day in &layout.days {
        let border = if day.column.is_today { theme.today } else { theme.grid_line };
        f.render_widget(
            Block::default()
                .borders(Borders::LEFT)
                .border_style(Style::default().fg(border)),
            column_rect(days_area, day.column.index),
        );
    }

    for positioned in placed {
        let Some(rect) = week_grid::event_rect(&positioned.geometry, &state.metrics, days_area, scale) else {
            continue;
        };
        let background = parse_hex_color(&positioned.geometry.background_color).unwrap_or(theme.all_day);
        let event = positioned.event;

        let mut lines = vec![
            Line::from(Span::styled(event.title.clone(), Style::default().add_modifier(Modifier::BOLD))),
            Line::from(event.time_label()),
        ];
        if let Some(location) = &event.location {
            lines.push(Line::from(location.clone()));
        }

        f.render_widget(Clear, rect);
        f.render_widget(
            Paragraph::new(lines).style(Style::default().bg(background).fg(theme.event_text)),
            rect,
        );
    }

    if let Some(position) = layout.current_time_position
        && let Some(today) = layout.days.iter().find(|day| day.column.is_today)
        && let Some(row) = week_grid::now_line_row(position, state.metrics.hour_height, scale, days_area.height)
    {
        let column = column_rect(days_area, today.column.index);
        let line_area = Rect {
            y: days_area.y + row,
            height: 1,
            ..column
        };
        f.render_widget(
            Paragraph::new("─".repeat(line_area.width as usize)).style(Style::default().fg(theme.now_line)),
            line_area,
        );
    }
}

fn render_status(f: &mut Frame, controller: &WeekViewController, theme: &Theme, area: Rect) {
    let text = match controller.state().edit {
        EditState::Editing(field) => format!(
            "Editing {} hour: type 0-23, Enter/Esc to apply, Tab to switch field",
            field.label()
        ),
        EditState::Idle => {
            "h/l week  t today  1-4 presets  s/e hours  j/k scroll  m layout  q quit".to_string()
        }
    };
    f.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(theme.hour_label))
            .alignment(Alignment::Center),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_tile_the_days_area() {
        let area = Rect { x: 7, y: 0, width: 73, height: 10 };

        let columns: Vec<Rect> = (0..DAYS_PER_WEEK).map(|i| column_rect(area, i)).collect();

        assert_eq!(columns[0].x, 7);
        assert_eq!(columns.iter().map(|c| c.width).sum::<u16>(), 73);
        for pair in columns.windows(2) {
            assert_eq!(pair[0].x + pair[0].width, pair[1].x);
        }
    }
}
