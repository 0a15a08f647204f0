//! Job Search Dashboard Main Application
//! Main window with control panel and dashboard view.

use crate::gui::{ControlPanel, ControlPanelAction, DashboardView};
use crate::pipeline::{self, DashboardReport};
use egui::SidePanel;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;

/// Pipeline result from background thread
enum LoadResult {
    Complete(DashboardReport),
    Error(String),
}

/// Main application window.
pub struct DashboardApp {
    control_panel: ControlPanel,
    dashboard: DashboardView,

    // Async pipeline run
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, initial: Option<PathBuf>) -> Self {
        let mut app = Self {
            control_panel: ControlPanel::new(),
            dashboard: DashboardView::new(),
            load_rx: None,
            is_loading: false,
        };
        if let Some(path) = initial {
            app.start_pipeline(path);
        }
        app
    }

    /// Handle workbook selection
    fn handle_browse_workbook(&mut self) {
        if self.is_loading {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Spreadsheets", &["xlsx", "xlsm", "xlsb", "xls", "ods"])
            .pick_file()
        {
            self.start_pipeline(path);
        }
    }

    /// Run the pipeline for `path` on a worker thread.
    fn start_pipeline(&mut self, path: PathBuf) {
        // A failed upload must not leave the previous dashboard on screen.
        self.dashboard.clear();
        self.control_panel.export_enabled = false;
        self.control_panel.settings.workbook_path = Some(path.clone());
        self.control_panel.set_status("Loading spreadsheet...");
        self.control_panel.busy = true;
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        tracing::debug!("starting pipeline for {}", path.display());
        thread::spawn(move || {
            let result = match pipeline::analyze_path(&path, pipeline::today()) {
                Ok(report) => LoadResult::Complete(report),
                Err(e) => {
                    tracing::warn!("failed to load {}: {}", path.display(), e);
                    LoadResult::Error(e.to_string())
                }
            };
            let _ = tx.send(result);
        });
    }

    /// Check for pipeline results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match poll_worker(&rx) {
            None => self.load_rx = Some(rx),
            Some(LoadResult::Complete(report)) => {
                self.control_panel.set_status(&format!(
                    "Complete! {} applications loaded",
                    report.snapshot.total_applications
                ));
                self.control_panel.export_enabled = true;
                self.dashboard.set_report(report);
                self.finish_loading();
            }
            Some(LoadResult::Error(error)) => {
                self.control_panel.set_status(&format!("Error: {}", error));
                self.finish_loading();
            }
        }
    }

    fn finish_loading(&mut self) {
        self.control_panel.busy = false;
        self.is_loading = false;
    }

    /// Export the current report as JSON
    fn handle_export_summary(&mut self) {
        let Some(report) = self.dashboard.report() else {
            self.control_panel.set_status("Nothing to export");
            return;
        };

        let output_path = match rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("job_search_summary.json")
            .save_file()
        {
            Some(path) => path,
            None => return,
        };

        match pipeline::export_report(&output_path, report, &self.control_panel.settings.targets) {
            Ok(()) => {
                let name = output_path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                self.control_panel
                    .set_status(&format!("Summary exported to {}", name));
            }
            Err(e) => {
                tracing::error!("export failed: {:#}", e);
                self.control_panel.set_status(&format!("Error: {:#}", e));
            }
        }
    }
}

/// Non-blocking poll of the worker channel. A worker that hung up without
/// sending a result is reported as an error.
fn poll_worker(rx: &Receiver<LoadResult>) -> Option<LoadResult> {
    match rx.try_recv() {
        Ok(result) => Some(result),
        Err(TryRecvError::Empty) => None,
        Err(TryRecvError::Disconnected) => {
            tracing::error!("pipeline worker stopped without a result");
            Some(LoadResult::Error(
                "loading stopped unexpectedly, please try again".to_string(),
            ))
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(330.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseWorkbook => self.handle_browse_workbook(),
                        ControlPanelAction::ExportSummary => self.handle_export_summary(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            self.dashboard.show(ui, &self.control_panel.settings.targets);
        });
    }
}
