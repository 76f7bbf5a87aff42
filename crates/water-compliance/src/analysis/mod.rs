//! Daily and annual compliance checks with a usage trend.

mod compliance;
mod normalizer;
mod parser;
mod report;
mod rules;
mod trend;

use crate::table::UsageTable;
use tracing::info;

pub use compliance::{AnnualViolation, DailyViolation};
pub use normalizer::{Measurement, WindowedUsage};
pub use report::{round_to, AnalysisOutcome, ComplianceReport, NoDataInRange, NO_DATA_MESSAGE};
pub use rules::ComplianceRules;
pub use trend::ols_slope;

/// Runs the analysis against the regulatory limits.
pub fn analyze(table: &UsageTable) -> AnalysisOutcome {
    analyze_with(table, &ComplianceRules::regulatory())
}

pub fn analyze_with(table: &UsageTable, rules: &ComplianceRules) -> AnalysisOutcome {
    let windowed = normalizer::normalize(table, rules);
    if windowed.is_empty() {
        info!(rows = table.len(), "no usage rows inside the compliance window");
        return AnalysisOutcome::NoDataInRange(NoDataInRange::default());
    }

    let report = summarize(&windowed, rules);
    info!(
        measurements = windowed.measurements().len(),
        daily_exceedances = report.daily_exceed_count,
        annual_exceedances = report.annual_exceed_count,
        trend_slope = report.trend_slope,
        "compliance analysis complete"
    );
    AnalysisOutcome::Report(report)
}

fn summarize(windowed: &WindowedUsage, rules: &ComplianceRules) -> ComplianceReport {
    let measurements = windowed.measurements();
    let daily = compliance::daily_statistics(measurements, rules);
    let yearly = compliance::yearly_statistics(measurements, rules);
    let slope = trend::trend_slope(measurements);
    ComplianceReport::assemble(daily, yearly, slope)
}
