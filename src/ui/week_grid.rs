//! Projection of pixel/percent event geometry onto terminal cells.
//!
//! The days area is the part of the terminal grid right of the hour labels.
//! Desktop geometry is expressed in percent of the whole grid, so the hour
//! label share is removed before scaling; mobile widths are percent of a
//! single day column.

use ratatui::layout::Rect;

use crate::week::geometry::{EventGeometry, GridMetrics, LayoutMode};
use crate::week::navigator::DAYS_PER_WEEK;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellScale {
    pub rows_per_hour: u16,
    pub scroll_rows: u16,
}

impl CellScale {
    fn rows(&self, pixels: f64, hour_height: f64) -> f64 {
        pixels / hour_height * self.rows_per_hour as f64
    }
}

/// Terminal rectangle for an event, clipped to `days_area`. `None` when the
/// event is scrolled out of view or the area is empty.
pub fn event_rect(
    geometry: &EventGeometry,
    metrics: &GridMetrics,
    days_area: Rect,
    scale: CellScale,
) -> Option<Rect> {
    if days_area.width == 0 || days_area.height == 0 {
        return None;
    }

    let grid_share = 100.0 - metrics.time_column_width;
    let area_width = days_area.width as f64;
    let column_cells = area_width / DAYS_PER_WEEK as f64;

    let x_offset = ((geometry.left - metrics.time_column_width) / grid_share * area_width).round();
    let width_cells = match metrics.layout {
        LayoutMode::Desktop => geometry.width / grid_share * area_width,
        LayoutMode::Mobile => geometry.width / 100.0 * column_cells,
    }
    .round()
    .max(1.0);

    let first_row = scale.rows(geometry.top, metrics.hour_height).floor();
    let last_row = scale
        .rows(geometry.top + geometry.height, metrics.hour_height)
        .ceil()
        .max(first_row + 1.0);

    let scroll = scale.scroll_rows as f64;
    let top = (first_row - scroll).max(0.0);
    let bottom = (last_row - scroll).min(days_area.height as f64);
    if bottom <= top {
        return None;
    }

    let x = x_offset.clamp(0.0, area_width - 1.0);
    let width = width_cells.min(area_width - x);

    Some(Rect {
        x: days_area.x + x as u16,
        y: days_area.y + top as u16,
        width: width as u16,
        height: (bottom - top) as u16,
    })
}

/// Row of the now-indicator inside the days area, if it is scrolled into view.
pub fn now_line_row(position: f64, hour_height: f64, scale: CellScale, visible_rows: u16) -> Option<u16> {
    let row = scale.rows(position, hour_height).floor() - scale.scroll_rows as f64;
    if row < 0.0 || row >= visible_rows as f64 {
        return None;
    }
    Some(row as u16)
}

/// Converts an auto-scroll pixel offset into a row offset, never negative.
pub fn scroll_rows_for(offset: f64, hour_height: f64, rows_per_hour: u16) -> u16 {
    let rows = (offset / hour_height * rows_per_hour as f64).floor();
    rows.clamp(0.0, u16::MAX as f64) as u16
}

/// Largest useful scroll offset for a window of `hour_rows` hours.
pub fn max_scroll(hour_rows: u32, rows_per_hour: u16, visible_rows: u16) -> u16 {
    let total = hour_rows.saturating_mul(rows_per_hour as u32);
    total.saturating_sub(visible_rows as u32).min(u16::MAX as u32) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::week::geometry::{EVENT_OPACITY, MinWidth};

    fn geometry(top: f64, height: f64, left: f64, width: f64) -> EventGeometry {
        EventGeometry {
            top,
            height,
            left,
            width,
            min_width: MinWidth::Pixels(80.0),
            z_index: 20,
            background_color: "#4285F4".to_string(),
            opacity: EVENT_OPACITY,
        }
    }

    fn metrics(layout: LayoutMode) -> GridMetrics {
        GridMetrics {
            hour_height: 60.0,
            time_column_width: 30.0,
            layout,
        }
    }

    const AREA: Rect = Rect {
        x: 6,
        y: 4,
        width: 70,
        height: 20,
    };

    #[test]
    fn first_column_event_maps_to_area_origin() {
        let scale = CellScale { rows_per_hour: 2, scroll_rows: 0 };
        let rect = event_rect(&geometry(0.0, 60.0, 30.0, 9.0), &metrics(LayoutMode::Desktop), AREA, scale).unwrap();

        assert_eq!(rect, Rect { x: 6, y: 4, width: 9, height: 2 });
    }

    #[test]
    fn third_column_event_is_offset_by_two_columns() {
        let scale = CellScale { rows_per_hour: 1, scroll_rows: 0 };
        let left = metrics(LayoutMode::Desktop).column_start(2);

        let rect = event_rect(&geometry(120.0, 90.0, left, 9.0), &metrics(LayoutMode::Desktop), AREA, scale).unwrap();

        assert_eq!(rect.x, 6 + 20);
        assert_eq!(rect.y, 4 + 2);
        assert_eq!(rect.height, 2);
    }

    #[test]
    fn scrolled_away_event_is_not_drawn() {
        let scale = CellScale { rows_per_hour: 1, scroll_rows: 5 };

        let rect = event_rect(&geometry(60.0, 60.0, 30.0, 9.0), &metrics(LayoutMode::Desktop), AREA, scale);

        assert_eq!(rect, None);
    }

    #[test]
    fn partly_scrolled_event_is_clipped_at_top() {
        let scale = CellScale { rows_per_hour: 1, scroll_rows: 2 };

        let rect = event_rect(&geometry(60.0, 180.0, 30.0, 9.0), &metrics(LayoutMode::Desktop), AREA, scale).unwrap();

        assert_eq!((rect.y, rect.height), (4, 2));
    }

    #[test]
    fn mobile_width_is_relative_to_one_column() {
        let scale = CellScale { rows_per_hour: 1, scroll_rows: 0 };

        let rect = event_rect(&geometry(0.0, 60.0, 30.0, 80.0), &metrics(LayoutMode::Mobile), AREA, scale).unwrap();

        assert_eq!(rect.width, 8);
    }

    #[test]
    fn now_line_hidden_when_scrolled_past() {
        let scale = CellScale { rows_per_hour: 2, scroll_rows: 4 };

        assert_eq!(now_line_row(150.0, 60.0, scale, 20), Some(1));
        assert_eq!(now_line_row(60.0, 60.0, scale, 20), None);
    }

    #[test]
    fn negative_scroll_offsets_clamp_to_zero() {
        assert_eq!(scroll_rows_for(-100.0, 60.0, 2), 0);
        assert_eq!(scroll_rows_for(740.0, 60.0, 2), 24);
    }

    #[test]
    fn max_scroll_leaves_last_hour_visible() {
        assert_eq!(max_scroll(24, 2, 20), 28);
        assert_eq!(max_scroll(4, 2, 20), 0);
    }
}
