//! Dashboard Pipeline
//! One call per uploaded tracker: load, compute, hand the report to the view.

use crate::config::DashboardTargets;
use crate::data::{ApplicationTable, DataLoader, LoadError};
use crate::stats::{MetricsEngine, MetricsSnapshot, Tip};
use anyhow::Context;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::path::Path;

/// Result of a single pipeline invocation.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub source_name: Option<String>,
    pub snapshot: MetricsSnapshot,
    pub tips: Vec<Tip>,
}

impl DashboardReport {
    pub fn from_table(table: &ApplicationTable, today: NaiveDate) -> Self {
        let snapshot = MetricsEngine::compute(table, today);
        let tips = snapshot.tips.tips();
        Self {
            source_name: None,
            snapshot,
            tips,
        }
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Run the pipeline over a workbook on disk.
pub fn analyze_path(path: &Path, today: NaiveDate) -> Result<DashboardReport, LoadError> {
    let table = DataLoader::load_path(path)?;
    tracing::info!(
        "loaded {} applications from {}",
        table.len(),
        path.display()
    );

    let mut report = DashboardReport::from_table(&table, today);
    report.source_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string());
    Ok(report)
}

/// Run the pipeline over workbook bytes.
pub fn analyze_bytes(bytes: &[u8], today: NaiveDate) -> Result<DashboardReport, LoadError> {
    let table = DataLoader::load_bytes(bytes)?;
    tracing::info!("loaded {} applications from upload", table.len());
    Ok(DashboardReport::from_table(&table, today))
}

#[derive(Serialize)]
struct ReportExport<'a> {
    targets: &'a DashboardTargets,
    #[serde(flatten)]
    report: &'a DashboardReport,
}

/// Write the report and the active targets as pretty JSON.
pub fn export_report(
    path: &Path,
    report: &DashboardReport,
    targets: &DashboardTargets,
) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&ReportExport { targets, report })
        .context("failed to serialize dashboard report")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!("exported dashboard report to {}", path.display());
    Ok(())
}
