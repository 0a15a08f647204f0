//! Chart Plotter Module
//! Draws the dashboard charts using egui_plot.

use crate::stats::{CategoryCount, TimelinePoint};
use chrono::{Datelike, NaiveDate};
use egui::Color32;
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

pub const LINE_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue

pub const PALETTE: [Color32; 6] = [
    Color32::from_rgb(99, 110, 250),  // Indigo
    Color32::from_rgb(239, 85, 59),   // Red
    Color32::from_rgb(0, 204, 150),   // Green
    Color32::from_rgb(171, 99, 250),  // Purple
    Color32::from_rgb(255, 161, 90),  // Orange
    Color32::from_rgb(25, 211, 243),  // Cyan
];

/// Colour of a canonical status in the status overview.
pub fn status_color(status: &str) -> Color32 {
    match status {
        "on-going" => Color32::from_rgb(40, 167, 69),
        "Sent" => Color32::from_rgb(255, 165, 0),
        "Rejected" => Color32::from_rgb(220, 53, 69),
        _ => Color32::GRAY,
    }
}

/// Plot x coordinate of a date.
pub fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// Inverse of `date_to_x`, for axis labels.
pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

/// Creates the dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Applications per day, with markers on every point.
    pub fn draw_timeline_chart(ui: &mut egui::Ui, timeline: &[TimelinePoint]) {
        let points: Vec<[f64; 2]> = timeline
            .iter()
            .map(|p| [date_to_x(p.date), p.applications as f64])
            .collect();

        Plot::new("applications_timeline")
            .height(280.0)
            .allow_scroll(false)
            .x_axis_label("Application Date")
            .y_axis_label("Applications")
            .include_y(0.0)
            .x_axis_formatter(|mark, _range| {
                x_to_date(mark.value)
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(LINE_COLOR)
                        .width(2.0)
                        .name("Applications"),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(4.0)
                        .color(LINE_COLOR),
                );
            });
    }

    /// One bar per category value, in the order given.
    pub fn draw_category_chart(ui: &mut egui::Ui, id: &str, axis: &str, counts: &[CategoryCount]) {
        let labels: Vec<String> = counts.iter().map(|c| c.value.clone()).collect();
        let bars: Vec<Bar> = counts
            .iter()
            .enumerate()
            .map(|(i, c)| {
                Bar::new(i as f64, c.count as f64)
                    .name(&c.value)
                    .width(0.6)
                    .fill(PALETTE[i % PALETTE.len()])
            })
            .collect();

        Plot::new(format!("bars_{}", id))
            .height(280.0)
            .allow_scroll(false)
            .allow_zoom(false)
            .x_axis_label(axis)
            .y_axis_label("Count")
            .include_y(0.0)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if idx >= 0.0 && (mark.value - idx).abs() < 1e-6 {
                    labels.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name(axis));
            });
    }
}
