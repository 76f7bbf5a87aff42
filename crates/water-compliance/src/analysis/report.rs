use super::compliance::{AnnualViolation, DailyStatistics, DailyViolation, YearlyStatistics};
use serde::Serialize;

pub const NO_DATA_MESSAGE: &str = "No data found in selected date range";

/// Compliance figures for one uploaded export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceReport {
    pub average_kld: f64,
    pub daily_exceed_count: usize,
    pub daily_violation_details: Vec<DailyViolation>,
    pub average_kly: f64,
    pub annual_exceed_count: usize,
    pub annual_violation_details: Vec<AnnualViolation>,
    pub trend_slope: f64,
}

impl ComplianceReport {
    pub(crate) fn assemble(
        daily: DailyStatistics,
        yearly: YearlyStatistics,
        trend_slope: f64,
    ) -> Self {
        Self {
            average_kld: round_to(daily.average, 2),
            daily_exceed_count: daily.violations.len(),
            daily_violation_details: daily.violations,
            average_kly: round_to(yearly.average, 2),
            annual_exceed_count: yearly.violations.len(),
            annual_violation_details: yearly.violations,
            trend_slope: round_to(trend_slope, 4),
        }
    }
}

/// Serialized as `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoDataInRange {
    pub error: &'static str,
}

impl Default for NoDataInRange {
    fn default() -> Self {
        Self {
            error: NO_DATA_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Report(ComplianceReport),
    NoDataInRange(NoDataInRange),
}

impl AnalysisOutcome {
    pub fn report(&self) -> Option<&ComplianceReport> {
        match self {
            AnalysisOutcome::Report(report) => Some(report),
            AnalysisOutcome::NoDataInRange(_) => None,
        }
    }

    pub fn is_empty_range(&self) -> bool {
        matches!(self, AnalysisOutcome::NoDataInRange(_))
    }
}

/// Rounds half-to-even on the exact binary value, matching fixed-point
/// formatting of the same number. Residues that round to zero come back as
/// `0.0`, never `-0.0`.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let rounded: f64 = format!("{value:.decimals$}").parse().unwrap_or(value);
    rounded + 0.0
}
