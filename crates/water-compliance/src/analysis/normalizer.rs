use super::parser::{cell_date, cell_total};
use super::rules::ComplianceRules;
use crate::table::{RawRecord, UsageTable};
use chrono::{Datelike, NaiveDate};
use tracing::debug;

/// A usage row whose date and total both parsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub date: NaiveDate,
    pub total: f64,
}

impl Measurement {
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    fn from_raw(record: &RawRecord) -> Option<Self> {
        let date = record.date.as_ref().and_then(cell_date)?;
        let total = record.value.as_ref().and_then(cell_total)?;
        Some(Self { date, total })
    }
}

/// Measurements inside the compliance window, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowedUsage {
    measurements: Vec<Measurement>,
}

impl WindowedUsage {
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }
}

pub(crate) fn clean(table: &UsageTable) -> Vec<Measurement> {
    let measurements: Vec<Measurement> = table
        .records()
        .iter()
        .filter_map(Measurement::from_raw)
        .collect();

    debug!(
        rows = table.len(),
        dropped = table.len() - measurements.len(),
        "discarded rows with unparseable date or value"
    );
    measurements
}

pub(crate) fn restrict_to_window(
    measurements: Vec<Measurement>,
    rules: &ComplianceRules,
) -> WindowedUsage {
    let before = measurements.len();
    let measurements: Vec<Measurement> = measurements
        .into_iter()
        .filter(|measurement| rules.in_window(measurement.date))
        .collect();

    debug!(
        kept = measurements.len(),
        outside_window = before - measurements.len(),
        start = %rules.window_start,
        end = %rules.window_end,
        "applied compliance window"
    );
    WindowedUsage { measurements }
}

pub(crate) fn normalize(table: &UsageTable, rules: &ComplianceRules) -> WindowedUsage {
    restrict_to_window(clean(table), rules)
}
