//! Metrics Engine Module
//! Derives the dashboard KPIs, histograms, timeline and tip flags from a table.

use crate::data::{
    ApplicationTable, CAREER_ALIGNMENT, CURRENT_STATUS, FIT_SCORE, INTEREST_LEVEL, LOCATION,
    SOURCE_OF_POSTING,
};
use crate::stats::tips::TipFlags;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Statuses surfaced individually in the status overview.
pub const CANONICAL_STATUSES: [&str; 3] = ["on-going", "Sent", "Rejected"];

pub const ONGOING_STATUS: &str = "on-going";

/// Days treated as one month when rating the application pace.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// A category value with its number of rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

/// Applications submitted on a single date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub applications: usize,
}

/// Share of "Y" and "N" among the answered alignment cells.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AlignmentShare {
    pub yes_pct: f64,
    pub no_pct: f64,
}

/// Everything the dashboard shows for one uploaded tracker.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub computed_on: NaiveDate,
    pub total_applications: usize,
    pub avg_fit_score: Option<f64>,
    pub avg_interest_score: Option<f64>,
    pub avg_per_month: f64,
    pub alignment: AlignmentShare,
    pub status_counts: Vec<CategoryCount>,
    pub location_counts: Vec<CategoryCount>,
    pub source_counts: Vec<CategoryCount>,
    pub timeline: Vec<TimelinePoint>,
    pub current_iso_week: u32,
    pub applications_this_week: usize,
    pub tips: TipFlags,
}

impl MetricsSnapshot {
    /// Rows with exactly this status, 0 when absent.
    pub fn status_count(&self, status: &str) -> usize {
        self.status_counts
            .iter()
            .find(|c| c.value == status)
            .map(|c| c.count)
            .unwrap_or(0)
    }

    /// The three canonical statuses with their counts, in display order.
    pub fn canonical_status_counts(&self) -> [(&'static str, usize); 3] {
        CANONICAL_STATUSES.map(|status| (status, self.status_count(status)))
    }
}

/// Stateless metrics computation over an ApplicationTable.
pub struct MetricsEngine;

impl MetricsEngine {
    /// Compute the full snapshot. `today` selects the ISO week for the weekly tracker.
    pub fn compute(table: &ApplicationTable, today: NaiveDate) -> MetricsSnapshot {
        let dates = table.dates();
        let current_iso_week = today.iso_week().week();

        MetricsSnapshot {
            computed_on: today,
            total_applications: table.len(),
            avg_fit_score: Self::rounded_mean(table, FIT_SCORE),
            avg_interest_score: Self::rounded_mean(table, INTEREST_LEVEL),
            avg_per_month: Self::average_per_month(&dates),
            alignment: Self::alignment_share(&table.present_categories(CAREER_ALIGNMENT)),
            status_counts: Self::category_counts(&table.present_categories(CURRENT_STATUS)),
            location_counts: Self::category_counts(&table.present_categories(LOCATION)),
            source_counts: Self::category_counts(&table.present_categories(SOURCE_OF_POSTING)),
            timeline: Self::timeline(&dates),
            current_iso_week,
            applications_this_week: Self::count_in_iso_week(&dates, current_iso_week),
            tips: TipFlags::evaluate(table),
        }
    }

    /// Column mean rounded to 2 decimals; `None` without values.
    pub fn rounded_mean(table: &ApplicationTable, column: &str) -> Option<f64> {
        table.mean_of(column).map(round2)
    }

    /// Applications per 30-day month over the span of the data.
    /// A single-day span reports the raw count; no dates reports 0.
    pub fn average_per_month(dates: &[NaiveDate]) -> f64 {
        let (Some(min), Some(max)) = (dates.iter().min(), dates.iter().max()) else {
            return 0.0;
        };

        let count = dates.len() as f64;
        let range_days = (*max - *min).num_days();
        if range_days > 0 {
            count / (range_days as f64 / DAYS_PER_MONTH)
        } else {
            count
        }
    }

    /// Percentages over answered cells only; both 0 when nothing is answered.
    pub fn alignment_share(values: &[String]) -> AlignmentShare {
        if values.is_empty() {
            return AlignmentShare::default();
        }

        let total = values.len() as f64;
        let share = |answer: &str| {
            values.iter().filter(|v| v.as_str() == answer).count() as f64 / total * 100.0
        };

        AlignmentShare {
            yes_pct: share("Y"),
            no_pct: share("N"),
        }
    }

    /// Count each distinct value. Most frequent first, ties by value.
    pub fn category_counts(values: &[String]) -> Vec<CategoryCount> {
        let mut map: HashMap<&str, usize> = HashMap::new();
        for value in values {
            *map.entry(value.as_str()).or_insert(0) += 1;
        }

        let mut counts: Vec<CategoryCount> = map
            .into_iter()
            .map(|(value, count)| CategoryCount {
                value: value.to_string(),
                count,
            })
            .collect();

        counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
        counts
    }

    /// One point per date present, ascending. Missing dates are not filled in.
    pub fn timeline(dates: &[NaiveDate]) -> Vec<TimelinePoint> {
        let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for date in dates {
            *per_day.entry(*date).or_insert(0) += 1;
        }

        per_day
            .into_iter()
            .map(|(date, applications)| TimelinePoint { date, applications })
            .collect()
    }

    /// Dates whose ISO week number matches `week`, regardless of year.
    pub fn count_in_iso_week(dates: &[NaiveDate], week: u32) -> usize {
        dates.iter().filter(|d| d.iso_week().week() == week).count()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
