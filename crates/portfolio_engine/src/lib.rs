//! The numeric core of the wealth dashboard.
//!
//! Everything in this crate is a pure function over already-validated
//! records: aggregation of assets and liabilities, normalization of
//! recurring cash flows onto a monthly basis, and year-by-year wealth
//! projection. No I/O, no clock access, no shared state — callers own the
//! collections and pass them in by reference.

pub mod aggregate;
pub mod cashflow;
pub mod projection;

pub use aggregate::{
    allocation_by_category, leverage_ratio, net_worth, total_amount, total_value,
    unrealized_gain, unrealized_gain_percent,
};
pub use cashflow::{monthly_totals, normalize_monthly, savings_rate, MonthlyTotals};
pub use projection::{project, ProjectionPoint};
