//! Job Search Dashboard - job tracker metrics, charts & personalized tips
//!
//! Loads a job-application tracker spreadsheet, derives the dashboard metrics and
//! renders them with egui.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod pipeline;
pub mod stats;
