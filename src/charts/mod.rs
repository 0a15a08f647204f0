//! Charts module - Chart rendering

mod plotter;

pub use plotter::{date_to_x, status_color, x_to_date, ChartPlotter};
