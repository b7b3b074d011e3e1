//! Record shapes for the wealth dashboard: assets, liabilities and recurring
//! cash-flow items, plus their creation-time validation.
//!
//! Records are immutable once created. Editing is modeled as delete +
//! recreate, so constructors are the single place where invariants are
//! enforced: every record that exists has a unique id, a non-empty name or
//! category label, and finite non-negative amounts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Raised when a draft record fails validation. The record is not created
/// and no collection is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("`{0}` must be a finite, non-negative number")]
    InvalidAmount(&'static str),

    #[error("`qty` must be a finite number greater than zero")]
    InvalidQty,

    #[error("position details require both `qty` and `costBasis`")]
    IncompletePosition,

    #[error("position details are only valid for stock or crypto assets")]
    PositionNotAllowed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AssetCategory {
    RealEstate,
    Stock,
    Gold,
    Crypto,
    Deposit,
    Insurance,
    Other,
}

impl AssetCategory {
    /// Stock and crypto holdings are tracked per unit; everything else is a
    /// single lump valuation.
    pub fn is_position_based(self) -> bool {
        matches!(self, AssetCategory::Stock | AssetCategory::Crypto)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiabilityCategory {
    Mortgage,
    PersonalLoan,
    BusinessLoan,
    CreditCard,
}

/// Currency is an informational label only. No conversion is performed
/// anywhere in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "KRW")]
    Krw,
    #[serde(rename = "USD")]
    Usd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CashFlowType {
    Income,
    Expense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Monthly,
    Yearly,
}

/// Per-unit holding detail, present only on stock/crypto assets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Unit count, always > 0.
    pub qty: f64,
    /// Per-unit acquisition cost, always >= 0.
    pub cost_basis: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub category: AssetCategory,
    /// Current market value in the nominal currency unit.
    pub value: f64,
    pub currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,
    /// Free-text annotation, e.g. ticker symbol or address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Liability {
    pub id: String,
    pub name: String,
    pub category: LiabilityCategory,
    /// Outstanding balance.
    pub amount: f64,
    /// Annual interest rate in percent.
    pub interest_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maturity_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: CashFlowType,
    /// Free-text label, e.g. "Salary" or "Rent".
    pub category: String,
    pub amount: f64,
    pub frequency: Frequency,
}

/// Draft asset as it arrives from a form submission. Quantity and cost basis
/// travel as flat optional fields on the wire and are folded into a
/// [`Position`] during validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAsset {
    pub name: Option<String>,
    pub category: Option<AssetCategory>,
    pub value: Option<f64>,
    pub currency: Option<Currency>,
    pub qty: Option<f64>,
    pub cost_basis: Option<f64>,
    pub purchase_date: Option<NaiveDate>,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLiability {
    pub name: Option<String>,
    pub category: Option<LiabilityCategory>,
    pub amount: Option<f64>,
    pub interest_rate: Option<f64>,
    pub maturity_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCashFlowItem {
    #[serde(rename = "type")]
    pub kind: Option<CashFlowType>,
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub frequency: Option<Frequency>,
}

fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

fn require_name(name: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match name {
        Some(n) if !n.trim().is_empty() => Ok(n),
        _ => Err(ValidationError::MissingField(field)),
    }
}

fn require_amount(value: Option<f64>, field: &'static str) -> Result<f64, ValidationError> {
    let v = value.ok_or(ValidationError::MissingField(field))?;
    if !v.is_finite() || v < 0.0 {
        return Err(ValidationError::InvalidAmount(field));
    }
    Ok(v)
}

impl Asset {
    /// Validates a draft and returns the fully-formed record with a fresh id.
    pub fn new(input: NewAsset) -> Result<Self, ValidationError> {
        let name = require_name(input.name, "name")?;
        let category = input
            .category
            .ok_or(ValidationError::MissingField("category"))?;
        let value = require_amount(input.value, "value")?;

        let position = match (input.qty, input.cost_basis) {
            (None, None) => None,
            (Some(qty), Some(cost_basis)) => {
                if !category.is_position_based() {
                    return Err(ValidationError::PositionNotAllowed);
                }
                if !qty.is_finite() || qty <= 0.0 {
                    return Err(ValidationError::InvalidQty);
                }
                if !cost_basis.is_finite() || cost_basis < 0.0 {
                    return Err(ValidationError::InvalidAmount("costBasis"));
                }
                Some(Position { qty, cost_basis })
            }
            _ => return Err(ValidationError::IncompletePosition),
        };

        Ok(Asset {
            id: fresh_id(),
            name,
            category,
            value,
            currency: input.currency.unwrap_or(Currency::Krw),
            position,
            purchase_date: input.purchase_date,
            details: input.details.filter(|d| !d.trim().is_empty()),
        })
    }
}

impl Liability {
    pub fn new(input: NewLiability) -> Result<Self, ValidationError> {
        let name = require_name(input.name, "name")?;
        let category = input
            .category
            .ok_or(ValidationError::MissingField("category"))?;
        let amount = require_amount(input.amount, "amount")?;

        let interest_rate = input.interest_rate.unwrap_or(0.0);
        if !interest_rate.is_finite() || interest_rate < 0.0 {
            return Err(ValidationError::InvalidAmount("interestRate"));
        }

        Ok(Liability {
            id: fresh_id(),
            name,
            category,
            amount,
            interest_rate,
            maturity_date: input.maturity_date,
        })
    }
}

impl CashFlowItem {
    pub fn new(input: NewCashFlowItem) -> Result<Self, ValidationError> {
        let category = require_name(input.category, "category")?;
        let amount = require_amount(input.amount, "amount")?;

        Ok(CashFlowItem {
            id: fresh_id(),
            kind: input.kind.unwrap_or(CashFlowType::Income),
            category,
            amount,
            frequency: input.frequency.unwrap_or(Frequency::Monthly),
        })
    }
}
