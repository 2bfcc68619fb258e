pub mod theme;
pub mod week_grid;
