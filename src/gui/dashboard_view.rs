//! Dashboard View Widget
//! Central scrollable panel: KPI cards, status overview, charts, tips and the
//! weekly target tracker.

use crate::charts::{status_color, ChartPlotter};
use crate::config::DashboardTargets;
use crate::pipeline::DashboardReport;
use crate::stats::{MetricsSnapshot, Tip, TipTone};
use egui::{Color32, RichText, ScrollArea};

const GOOD: Color32 = Color32::from_rgb(76, 175, 80);
const BAD: Color32 = Color32::from_rgb(244, 67, 54);
const INFO: Color32 = Color32::from_rgb(52, 152, 219);
const WARNING: Color32 = Color32::from_rgb(255, 193, 7);

const CARD_HEIGHT: f32 = 110.0;
const SECTION_SPACING: f32 = 30.0;

/// Stateless rendering of the latest report.
#[derive(Default)]
pub struct DashboardView {
    report: Option<DashboardReport>,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.report = None;
    }

    pub fn set_report(&mut self, report: DashboardReport) {
        self.report = Some(report);
    }

    pub fn report(&self) -> Option<&DashboardReport> {
        self.report.as_ref()
    }

    pub fn show(&self, ui: &mut egui::Ui, targets: &DashboardTargets) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(RichText::new("My Job Search Dashboard").size(28.0).strong());
                });
                ui.add_space(15.0);

                let Some(report) = &self.report else {
                    Self::draw_welcome(ui);
                    return;
                };

                let snapshot = &report.snapshot;
                Self::draw_kpi_cards(ui, snapshot, targets);
                ui.add_space(SECTION_SPACING);
                Self::draw_status_overview(ui, snapshot);
                ui.add_space(SECTION_SPACING);
                Self::draw_charts(ui, snapshot);
                ui.add_space(SECTION_SPACING);
                Self::draw_tips(ui, &report.tips);
                ui.add_space(SECTION_SPACING);
                Self::draw_weekly_tracker(ui, snapshot, targets);
                ui.add_space(SECTION_SPACING);
            });
    }

    fn draw_welcome(ui: &mut egui::Ui) {
        Self::draw_note(
            ui,
            "Please upload your job tracker spreadsheet to get started.",
            INFO,
        );
        ui.add_space(10.0);
        ui.label(
            RichText::new(
                "The dashboard expects the job tracker template with the columns: \
                 Application Date, Fit Score (1-5), My Interest Level (1-5), Current Status, \
                 Location, Source of Posting, Alignment with Career Goals (Y/N).",
            )
            .size(15.0),
        );
    }

    fn draw_kpi_cards(ui: &mut egui::Ui, snapshot: &MetricsSnapshot, targets: &DashboardTargets) {
        let default_color = ui.visuals().text_color();

        let fit_color = if targets.fit_on_target(snapshot.avg_fit_score) { GOOD } else { BAD };
        let interest_color = if targets.interest_on_target(snapshot.avg_interest_score) {
            GOOD
        } else {
            BAD
        };
        let pace_ok = targets.pace_on_target(snapshot.avg_per_month);

        ui.columns(5, |cols| {
            Self::draw_card(
                &mut cols[0],
                "Total Applications",
                snapshot.total_applications.to_string(),
                default_color,
            );
            Self::draw_card(
                &mut cols[1],
                "Avg Fit Score",
                format_average(snapshot.avg_fit_score),
                fit_color,
            );
            Self::draw_card(
                &mut cols[2],
                "Avg Interest Score",
                format_average(snapshot.avg_interest_score),
                interest_color,
            );
            Self::draw_card(
                &mut cols[3],
                "Avg/Month",
                format!(
                    "{:.2} {}",
                    snapshot.avg_per_month,
                    if pace_ok { "✅" } else { "❌" }
                ),
                if pace_ok { GOOD } else { BAD },
            );
            Self::draw_card(
                &mut cols[4],
                "Career Alignment",
                format!(
                    "✅: {:.1}%\n❌: {:.1}%",
                    snapshot.alignment.yes_pct, snapshot.alignment.no_pct
                ),
                default_color,
            );
        });
    }

    fn draw_card(ui: &mut egui::Ui, title: &str, value: String, color: Color32) {
        egui::Frame::none()
            .rounding(10.0)
            .stroke(egui::Stroke::new(1.0, Color32::from_gray(200)))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_min_height(CARD_HEIGHT);
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(title).size(18.0).strong());
                    ui.add_space(8.0);
                    ui.label(RichText::new(value).size(24.0).color(color));
                });
            });
    }

    fn draw_status_overview(ui: &mut egui::Ui, snapshot: &MetricsSnapshot) {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("Status Overview").size(24.0).strong());
            ui.add_space(10.0);
            for (status, count) in snapshot.canonical_status_counts() {
                ui.label(
                    RichText::new(format!("■ {}: {}", status, count))
                        .size(26.0)
                        .strong()
                        .color(status_color(status)),
                );
            }
        });
    }

    fn draw_charts(ui: &mut egui::Ui, snapshot: &MetricsSnapshot) {
        ui.label(RichText::new("Applications Over Time").size(20.0).strong());
        ui.add_space(5.0);
        if snapshot.timeline.is_empty() {
            Self::draw_note(ui, "No applications to display.", INFO);
        } else {
            ChartPlotter::draw_timeline_chart(ui, &snapshot.timeline);
        }

        ui.add_space(SECTION_SPACING);

        ui.columns(2, |cols| {
            cols[0].label(RichText::new("Applications by Location").size(20.0).strong());
            if snapshot.location_counts.is_empty() {
                Self::draw_note(&mut cols[0], "No data", INFO);
            } else {
                ChartPlotter::draw_category_chart(
                    &mut cols[0],
                    "location",
                    "Location",
                    &snapshot.location_counts,
                );
            }

            cols[1].label(RichText::new("Applications by Channel").size(20.0).strong());
            if snapshot.source_counts.is_empty() {
                Self::draw_note(&mut cols[1], "No data", INFO);
            } else {
                ChartPlotter::draw_category_chart(
                    &mut cols[1],
                    "source",
                    "Source",
                    &snapshot.source_counts,
                );
            }
        });
    }

    fn draw_tips(ui: &mut egui::Ui, tips: &[Tip]) {
        ui.label(RichText::new("Personalized Tips").size(24.0).strong());
        ui.add_space(10.0);
        for tip in tips {
            let color = match tip.tone {
                TipTone::Info => INFO,
                TipTone::Warning => WARNING,
                TipTone::Success => GOOD,
            };
            Self::draw_note(ui, tip.message, color);
            ui.add_space(6.0);
        }
    }

    fn draw_weekly_tracker(
        ui: &mut egui::Ui,
        snapshot: &MetricsSnapshot,
        targets: &DashboardTargets,
    ) {
        let submitted = snapshot.applications_this_week;
        let (text, color) = if submitted >= targets.weekly_goal {
            (
                format!(
                    "You submitted {} applications this week! Great job! 🎉",
                    submitted
                ),
                Color32::from_rgb(40, 167, 69),
            )
        } else {
            (
                format!(
                    "You have {} applications left to reach your weekly goal of {}!",
                    targets.remaining_this_week(submitted),
                    targets.weekly_goal
                ),
                BAD,
            )
        };

        ui.vertical_centered(|ui| {
            ui.label(RichText::new("⏰ Weekly Target Tracker").size(24.0).strong());
            ui.label(
                RichText::new(format!("ISO week {}", snapshot.current_iso_week))
                    .size(12.0)
                    .color(Color32::GRAY),
            );
            ui.add_space(10.0);
            ui.label(RichText::new(text).size(26.0).strong().color(color));
        });
    }

    fn draw_note(ui: &mut egui::Ui, text: &str, color: Color32) {
        egui::Frame::none()
            .fill(color.gamma_multiply(0.15))
            .rounding(5.0)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(text).size(15.0).color(color));
            });
    }
}

/// Averages render as "No data" when nothing could be averaged.
fn format_average(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "No data".to_string())
}
