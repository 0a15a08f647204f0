//! Application Table Module
//! The cleaned in-memory job tracker, backed by a Polars DataFrame.

use chrono::NaiveDate;
use polars::prelude::*;

pub const APPLICATION_DATE: &str = "Application Date";
pub const FIT_SCORE: &str = "Fit Score (1-5)";
pub const INTEREST_LEVEL: &str = "My Interest Level (1-5)";
pub const CURRENT_STATUS: &str = "Current Status";
pub const LOCATION: &str = "Location";
pub const SOURCE_OF_POSTING: &str = "Source of Posting";
pub const CAREER_ALIGNMENT: &str = "Alignment with Career Goals (Y/N)";

/// Every column the tracker template must provide, in template order.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    APPLICATION_DATE,
    FIT_SCORE,
    INTEREST_LEVEL,
    CURRENT_STATUS,
    LOCATION,
    SOURCE_OF_POSTING,
    CAREER_ALIGNMENT,
];

/// One row of the job tracker.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApplicationRecord {
    pub application_date: NaiveDate,
    pub fit_score: Option<f64>,
    pub interest_level: Option<f64>,
    pub status: Option<String>,
    pub location: Option<String>,
    pub source: Option<String>,
    pub alignment: Option<String>,
}

impl ApplicationRecord {
    pub fn new(application_date: NaiveDate) -> Self {
        Self {
            application_date,
            ..Default::default()
        }
    }
}

/// Immutable table of applications. Every row carries a valid application date.
#[derive(Debug, Clone)]
pub struct ApplicationTable {
    df: DataFrame,
}

impl ApplicationTable {
    /// Build the table from records, keeping their order.
    pub fn from_records(records: Vec<ApplicationRecord>) -> PolarsResult<Self> {
        let n = records.len();
        let mut dates = Vec::with_capacity(n);
        let mut fit = Vec::with_capacity(n);
        let mut interest = Vec::with_capacity(n);
        let mut status = Vec::with_capacity(n);
        let mut location = Vec::with_capacity(n);
        let mut source = Vec::with_capacity(n);
        let mut alignment = Vec::with_capacity(n);

        for record in records {
            dates.push(record.application_date);
            fit.push(record.fit_score);
            interest.push(record.interest_level);
            status.push(record.status);
            location.push(record.location);
            source.push(record.source);
            alignment.push(record.alignment);
        }

        let date_col = DateChunked::from_naive_date(APPLICATION_DATE.into(), dates).into_series();

        let df = DataFrame::new(vec![
            Column::from(date_col),
            Column::new(FIT_SCORE.into(), fit),
            Column::new(INTEREST_LEVEL.into(), interest),
            Column::new(CURRENT_STATUS.into(), status),
            Column::new(LOCATION.into(), location),
            Column::new(SOURCE_OF_POSTING.into(), source),
            Column::new(CAREER_ALIGNMENT.into(), alignment),
        ])?;

        Ok(Self { df })
    }

    pub fn empty() -> PolarsResult<Self> {
        Self::from_records(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Underlying DataFrame, read-only.
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Application dates in row order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.df
            .column(APPLICATION_DATE)
            .ok()
            .and_then(|col| {
                col.as_materialized_series()
                    .date()
                    .ok()
                    .map(|ca| ca.as_date_iter().flatten().collect())
            })
            .unwrap_or_default()
    }

    /// Mean of a numeric column, ignoring nulls. `None` when it has no values.
    pub fn mean_of(&self, column: &str) -> Option<f64> {
        self.df
            .column(column)
            .ok()
            .and_then(|col| col.f64().ok().and_then(|ca| ca.mean()))
    }

    /// Non-null values of a numeric column.
    pub fn numeric_values(&self, column: &str) -> Vec<f64> {
        self.df
            .column(column)
            .ok()
            .and_then(|col| {
                col.f64()
                    .ok()
                    .map(|ca| ca.into_iter().flatten().collect())
            })
            .unwrap_or_default()
    }

    /// Values of a categorical column in row order, nulls included.
    pub fn categories(&self, column: &str) -> Vec<Option<String>> {
        self.df
            .column(column)
            .ok()
            .and_then(|col| {
                col.as_materialized_series().str().ok().map(|ca| {
                    ca.into_iter()
                        .map(|v| v.map(|s| s.to_string()))
                        .collect()
                })
            })
            .unwrap_or_default()
    }

    /// Non-null values of a categorical column in row order.
    pub fn present_categories(&self, column: &str) -> Vec<String> {
        self.categories(column).into_iter().flatten().collect()
    }
}
