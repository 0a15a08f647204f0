//! Personalized Tips Module
//! Independent rule predicates over the table and the advice they unlock.

use crate::data::{
    ApplicationTable, CAREER_ALIGNMENT, CURRENT_STATUS, INTEREST_LEVEL, LOCATION,
    SOURCE_OF_POSTING,
};
use crate::stats::calculator::ONGOING_STATUS;
use serde::Serialize;
use std::collections::HashSet;

pub const FEW_SOURCES_MAX: usize = 2;
pub const FEW_LOCATIONS_MAX: usize = 3;
pub const MAX_INTEREST: f64 = 5.0;
pub const MANY_APPLICATIONS: usize = 50;

/// Outcome of every tip rule for one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TipFlags {
    pub few_sources: bool,
    pub few_locations: bool,
    pub all_interest_max: bool,
    pub never_aligned: bool,
    pub many_apps_no_progress: bool,
}

impl TipFlags {
    pub fn evaluate(table: &ApplicationTable) -> Self {
        Self {
            few_sources: few_sources(table),
            few_locations: few_locations(table),
            all_interest_max: all_interest_max(table),
            never_aligned: never_aligned(table),
            many_apps_no_progress: many_apps_no_progress(table),
        }
    }

    pub fn is_set(&self, kind: TipKind) -> bool {
        match kind {
            TipKind::FewSources => self.few_sources,
            TipKind::FewLocations => self.few_locations,
            TipKind::AllInterestMax => self.all_interest_max,
            TipKind::NeverAligned => self.never_aligned,
            TipKind::ManyAppsNoProgress => self.many_apps_no_progress,
        }
    }

    /// Tips to display, in fixed order. A rule without praise is omitted when unset.
    pub fn tips(&self) -> Vec<Tip> {
        TipKind::ALL
            .iter()
            .filter_map(|&kind| {
                let triggered = self.is_set(kind);
                let (message, tone) = if triggered {
                    (kind.advice(), kind.tone())
                } else {
                    (kind.praise()?, TipTone::Success)
                };
                Some(Tip {
                    kind,
                    triggered,
                    tone,
                    message,
                })
            })
            .collect()
    }
}

/// How a tip is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TipTone {
    Info,
    Warning,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TipKind {
    FewSources,
    FewLocations,
    AllInterestMax,
    NeverAligned,
    ManyAppsNoProgress,
}

impl TipKind {
    pub const ALL: [TipKind; 5] = [
        TipKind::FewSources,
        TipKind::FewLocations,
        TipKind::AllInterestMax,
        TipKind::NeverAligned,
        TipKind::ManyAppsNoProgress,
    ];

    pub fn advice(self) -> &'static str {
        match self {
            TipKind::FewSources => "Consider expanding to other channels – employee referrals can significantly increase your chances!",
            TipKind::FewLocations => "Most roles today offer hybrid or remote options – don't limit your search by geography.",
            TipKind::AllInterestMax => "Are you truly excited about every role? Use the interest score to prioritize smarter.",
            TipKind::NeverAligned => "You deserve roles aligned with your long-term goals. Try filtering more deliberately.",
            TipKind::ManyAppsNoProgress => "If you're not getting callbacks, consider tailoring your CV or cover letter.",
        }
    }

    pub fn praise(self) -> Option<&'static str> {
        match self {
            TipKind::FewSources => Some("Great job using multiple job platforms!"),
            TipKind::FewLocations => Some("Nice variety of job locations – stay open!"),
            TipKind::AllInterestMax => Some("You're using interest level to guide decisions – awesome!"),
            TipKind::NeverAligned => Some("You're aligning your search with your long-term goals – well done!"),
            TipKind::ManyAppsNoProgress => None,
        }
    }

    fn tone(self) -> TipTone {
        match self {
            TipKind::NeverAligned | TipKind::ManyAppsNoProgress => TipTone::Warning,
            _ => TipTone::Info,
        }
    }
}

/// A rendered tip line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tip {
    pub kind: TipKind,
    pub triggered: bool,
    pub tone: TipTone,
    pub message: &'static str,
}

fn distinct_count(values: Vec<String>) -> usize {
    values.into_iter().collect::<HashSet<_>>().len()
}

pub fn few_sources(table: &ApplicationTable) -> bool {
    distinct_count(table.present_categories(SOURCE_OF_POSTING)) <= FEW_SOURCES_MAX
}

pub fn few_locations(table: &ApplicationTable) -> bool {
    distinct_count(table.present_categories(LOCATION)) <= FEW_LOCATIONS_MAX
}

/// The distinct interest levels are exactly {5}.
pub fn all_interest_max(table: &ApplicationTable) -> bool {
    let values = table.numeric_values(INTEREST_LEVEL);
    !values.is_empty() && values.iter().all(|v| *v == MAX_INTEREST)
}

/// Every answered alignment is "N". True when nothing is answered.
pub fn never_aligned(table: &ApplicationTable) -> bool {
    table
        .present_categories(CAREER_ALIGNMENT)
        .iter()
        .all(|v| v == "N")
}

pub fn many_apps_no_progress(table: &ApplicationTable) -> bool {
    table.len() > MANY_APPLICATIONS
        && !table
            .present_categories(CURRENT_STATUS)
            .iter()
            .any(|s| s == ONGOING_STATUS)
}
