//! Ordinary least squares trend over observation order.
//!
//! Each measurement is placed on an integer axis by its rank after sorting by
//! date (0, 1, 2, ...). Gaps between dates and repeated dates are not weighted;
//! the axis counts observations, not days. Ties keep their file order because
//! the sort is stable.
//!
//! The fit is solved through an SVD least squares solve on the design matrix
//! `[1, i]`. A single observation has no spread on the axis and reports a
//! flat `0.0` slope.

use super::normalizer::Measurement;
use nalgebra::{DMatrix, DVector};

const SOLVE_TOLERANCES: [f64; 3] = [1e-10, 1e-8, 1e-6];

pub(crate) fn trend_slope(measurements: &[Measurement]) -> f64 {
    let mut ordered: Vec<&Measurement> = measurements.iter().collect();
    ordered.sort_by_key(|measurement| measurement.date);

    let series: Vec<f64> = ordered.iter().map(|measurement| measurement.total).collect();
    ols_slope(&series)
}

/// Slope of `y ~ a + b * i` for `i = 0..y.len()`.
pub fn ols_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }

    let design = DMatrix::from_fn(n, 2, |row, col| if col == 0 { 1.0 } else { row as f64 });
    let target = DVector::from_column_slice(values);

    solve_least_squares(&design, &target)
        .map(|beta| beta[1])
        .unwrap_or(0.0)
}

/// Returns `None` if no tolerance yields a finite solution.
fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    SOLVE_TOLERANCES.iter().find_map(|&tolerance| {
        svd.solve(y, tolerance)
            .ok()
            .filter(|beta| beta.iter().all(|value| value.is_finite()))
    })
}
