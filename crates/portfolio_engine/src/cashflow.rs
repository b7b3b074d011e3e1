//! Cash-flow normalization: recurring entries with mixed frequencies are
//! folded onto a common monthly basis before aggregation.

use serde::Serialize;

use models::{CashFlowItem, CashFlowType, Frequency};

/// Monthly income, expense and their difference, all on the normalized
/// monthly basis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyTotals {
    pub income: f64,
    pub expense: f64,
    pub surplus: f64,
}

/// Monthly equivalent of a single entry: yearly amounts are spread over
/// twelve months, monthly amounts pass through.
pub fn normalize_monthly(item: &CashFlowItem) -> f64 {
    match item.frequency {
        Frequency::Monthly => item.amount,
        Frequency::Yearly => item.amount / 12.0,
    }
}

/// Partitions entries by type, normalizes each and sums per partition.
pub fn monthly_totals(items: &[CashFlowItem]) -> MonthlyTotals {
    let mut income = 0.0;
    let mut expense = 0.0;
    for item in items {
        match item.kind {
            CashFlowType::Income => income += normalize_monthly(item),
            CashFlowType::Expense => expense += normalize_monthly(item),
        }
    }
    MonthlyTotals {
        income,
        expense,
        surplus: income - expense,
    }
}

/// Surplus as a percentage of income. `None` when there is no income to
/// divide by; the raw value is signed and may be negative — whether to show
/// it is the presentation layer's call.
pub fn savings_rate(totals: &MonthlyTotals) -> Option<f64> {
    if totals.income == 0.0 {
        return None;
    }
    Some(totals.surplus / totals.income * 100.0)
}
