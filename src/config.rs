//! Dashboard targets used to colour the KPI cards and the weekly tracker.

use serde::Serialize;

/// Goals the dashboard measures progress against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashboardTargets {
    /// Applications wanted per ISO week.
    pub weekly_goal: usize,
    /// Applications wanted per 30-day month.
    pub monthly_goal: f64,
    pub good_fit_score: f64,
    pub good_interest_score: f64,
}

impl Default for DashboardTargets {
    fn default() -> Self {
        Self {
            weekly_goal: 10,
            monthly_goal: 40.0,
            good_fit_score: 3.5,
            good_interest_score: 4.0,
        }
    }
}

impl DashboardTargets {
    pub fn fit_on_target(&self, avg_fit: Option<f64>) -> bool {
        avg_fit.is_some_and(|v| v >= self.good_fit_score)
    }

    pub fn interest_on_target(&self, avg_interest: Option<f64>) -> bool {
        avg_interest.is_some_and(|v| v >= self.good_interest_score)
    }

    pub fn pace_on_target(&self, avg_per_month: f64) -> bool {
        avg_per_month >= self.monthly_goal
    }

    /// Applications still missing this week, 0 once the goal is met.
    pub fn remaining_this_week(&self, submitted: usize) -> usize {
        self.weekly_goal.saturating_sub(submitted)
    }
}
