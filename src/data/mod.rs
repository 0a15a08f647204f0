//! Data module - spreadsheet loading and the application table

mod loader;
mod table;

pub use loader::{date_from_serial, parse_date_text, DataLoader, LoadError};
pub use table::{
    ApplicationRecord, ApplicationTable, APPLICATION_DATE, CAREER_ALIGNMENT, CURRENT_STATUS,
    FIT_SCORE, INTEREST_LEVEL, LOCATION, REQUIRED_COLUMNS, SOURCE_OF_POSTING,
};
