//! Year-by-year wealth projection under compounding assumptions.
//!
//! The current calendar year is an explicit input, never read from a clock,
//! so identical inputs always produce identical sequences.

use serde::Serialize;

/// One year of the projected trajectory. The target amount is carried on
/// every point so a goal line can be drawn against the series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    pub year: i32,
    pub projected_net_worth: f64,
    pub target_amount: f64,
}

/// Projects net worth from `current_year` through two years past the target.
///
/// Each step applies the annual return to the running balance first, then
/// adds the year's contribution — return compounds on capital held during
/// the year, new capital lands at year-end. The first emitted point is the
/// unmodified starting value.
///
/// A target year in the past still yields the three padded points from
/// `current_year` through `current_year + 2`. Negative returns and negative
/// contributions follow the same recurrence; the balance is never clamped
/// at zero.
pub fn project(
    start_net_worth: f64,
    current_year: i32,
    target_year: i32,
    target_amount: f64,
    annual_return_pct: f64,
    annual_contribution: f64,
) -> Vec<ProjectionPoint> {
    let end_year = target_year.max(current_year) + 2;
    let mut points = Vec::with_capacity((end_year - current_year + 1) as usize);
    let mut current = start_net_worth;
    for year in current_year..=end_year {
        points.push(ProjectionPoint {
            year,
            projected_net_worth: current.round(),
            target_amount,
        });
        current = current * (1.0 + annual_return_pct / 100.0) + annual_contribution;
    }
    points
}
