//! Stats module - dashboard metrics and personalized tips

mod calculator;
pub mod tips;

pub use calculator::{
    AlignmentShare, CategoryCount, MetricsEngine, MetricsSnapshot, TimelinePoint,
    CANONICAL_STATUSES,
};
pub use tips::{Tip, TipFlags, TipKind, TipTone};
