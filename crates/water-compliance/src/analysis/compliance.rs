use super::normalizer::Measurement;
use super::rules::ComplianceRules;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyViolation {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualViolation {
    pub year: i32,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DailyStatistics {
    pub(crate) average: f64,
    pub(crate) violations: Vec<DailyViolation>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct YearlyStatistics {
    pub(crate) average: f64,
    pub(crate) violations: Vec<AnnualViolation>,
}

pub(crate) fn daily_statistics(
    measurements: &[Measurement],
    rules: &ComplianceRules,
) -> DailyStatistics {
    let violations = measurements
        .iter()
        .filter(|measurement| rules.exceeds_daily(measurement.total))
        .map(|measurement| DailyViolation {
            date: measurement.date,
            value: measurement.total,
        })
        .collect();

    DailyStatistics {
        average: mean(measurements.iter().map(|measurement| measurement.total)),
        violations,
    }
}

pub(crate) fn yearly_statistics(
    measurements: &[Measurement],
    rules: &ComplianceRules,
) -> YearlyStatistics {
    let mut totals: BTreeMap<i32, f64> = BTreeMap::new();
    for measurement in measurements {
        *totals.entry(measurement.year()).or_insert(0.0) += measurement.total;
    }

    let violations = totals
        .iter()
        .filter(|(_, total)| rules.exceeds_annual(**total))
        .map(|(year, total)| AnnualViolation {
            year: *year,
            total: *total,
        })
        .collect();

    YearlyStatistics {
        average: mean(totals.values().copied()),
        violations,
    }
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let count = values.len();
    if count == 0 {
        return 0.0;
    }
    values.sum::<f64>() / count as f64
}
