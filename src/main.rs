//! Job Search Dashboard - job tracker metrics, charts & personalized tips

use eframe::egui;
use jobsearch_dashboard::gui::DashboardApp;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Optional workbook to open on start-up
    let initial = std::env::args_os().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("My Job Search Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "My Job Search Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, initial)))),
    )
}
