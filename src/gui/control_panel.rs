//! Control Panel Widget
//! Left side panel with the file picker, targets and export.

use crate::config::DashboardTargets;
use egui::{Color32, DragValue, RichText};
use std::path::PathBuf;

/// User settings for the session
#[derive(Default, Clone)]
pub struct UserSettings {
    pub workbook_path: Option<PathBuf>,
    pub targets: DashboardTargets,
}

/// Left side control panel with file selection and dashboard targets.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub status: String,
    pub busy: bool,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            status: "Ready".to_string(),
            busy: false,
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("💼 Job Search")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(RichText::new("Dashboard").size(11.0).color(Color32::GRAY));
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Workbook Section =====
        ui.label(RichText::new("📁 Job Tracker").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .settings
                        .workbook_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.settings.workbook_path.is_some() {
                            ui.visuals().text_color()
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add_enabled_ui(!self.busy, |ui| {
                            if ui.button("📂 Browse").clicked() {
                                action = ControlPanelAction::BrowseWorkbook;
                            }
                        });
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Targets Section =====
        ui.label(RichText::new("🎯 Targets").size(14.0).strong());
        ui.add_space(8.0);

        let label_width = 130.0;
        let targets = &mut self.settings.targets;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Weekly goal:"));
            ui.add(DragValue::new(&mut targets.weekly_goal).range(1..=200));
        });
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Monthly goal:"));
            ui.add(DragValue::new(&mut targets.monthly_goal).range(1.0..=1000.0).speed(1.0));
        });
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Good fit score:"));
            ui.add(DragValue::new(&mut targets.good_fit_score).range(1.0..=5.0).speed(0.1));
        });
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Good interest:"));
            ui.add(
                DragValue::new(&mut targets.good_interest_score)
                    .range(1.0..=5.0)
                    .speed(0.1),
            );
        });
        ui.add_space(5.0);
        if ui.small_button("Reset to defaults").clicked() {
            *targets = DashboardTargets::default();
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled && !self.busy, |ui| {
                let button = egui::Button::new(RichText::new("💾 Export Summary").size(14.0))
                    .min_size(egui::vec2(180.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportSummary;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        ui.horizontal(|ui| {
            if self.busy {
                ui.spinner();
            }
            let status_color = if self.status.starts_with("Error") {
                Color32::from_rgb(220, 53, 69)
            } else if self.export_enabled {
                Color32::from_rgb(40, 167, 69)
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(&self.status).size(11.0).color(status_color));
        });

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseWorkbook,
    ExportSummary,
}
