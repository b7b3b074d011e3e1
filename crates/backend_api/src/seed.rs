//! Demo portfolio loaded on startup when `DEMO_PORTFOLIO=1`, so the
//! dashboard has something to show before the first form submission.

use models::{
    Asset, AssetCategory, CashFlowItem, CashFlowType, Currency, Frequency, Liability,
    LiabilityCategory, NewAsset, NewCashFlowItem, NewLiability, ValidationError,
};

pub struct DemoRecords {
    pub assets: Vec<Asset>,
    pub liabilities: Vec<Liability>,
    pub cash_flow: Vec<CashFlowItem>,
}

/// Builds the sample records through the normal constructors so the seed
/// obeys the same validation as user input.
pub fn demo_records() -> Result<DemoRecords, ValidationError> {
    let assets = vec![
        Asset::new(NewAsset {
            name: Some("Samsung Electronics".to_string()),
            category: Some(AssetCategory::Stock),
            value: Some(150_000_000.0),
            currency: Some(Currency::Krw),
            qty: Some(2000.0),
            cost_basis: Some(65_000.0),
            details: Some("005930.KS".to_string()),
            ..Default::default()
        })?,
        Asset::new(NewAsset {
            name: Some("Tesla".to_string()),
            category: Some(AssetCategory::Stock),
            value: Some(85_000_000.0),
            currency: Some(Currency::Usd),
            qty: Some(300.0),
            cost_basis: Some(180.0),
            details: Some("TSLA".to_string()),
            ..Default::default()
        })?,
        Asset::new(NewAsset {
            name: Some("Hannam The Hill".to_string()),
            category: Some(AssetCategory::RealEstate),
            value: Some(8_500_000_000.0),
            currency: Some(Currency::Krw),
            details: Some("Yongsan-gu, Seoul".to_string()),
            ..Default::default()
        })?,
        Asset::new(NewAsset {
            name: Some("Bitcoin".to_string()),
            category: Some(AssetCategory::Crypto),
            value: Some(120_000_000.0),
            currency: Some(Currency::Usd),
            qty: Some(1.5),
            cost_basis: Some(45_000_000.0),
            details: Some("BTC".to_string()),
            ..Default::default()
        })?,
        Asset::new(NewAsset {
            name: Some("Gold bars".to_string()),
            category: Some(AssetCategory::Gold),
            value: Some(50_000_000.0),
            currency: Some(Currency::Krw),
            ..Default::default()
        })?,
    ];

    let liabilities = vec![
        Liability::new(NewLiability {
            name: Some("Home mortgage".to_string()),
            category: Some(LiabilityCategory::Mortgage),
            amount: Some(3_000_000_000.0),
            interest_rate: Some(3.5),
            ..Default::default()
        })?,
        Liability::new(NewLiability {
            name: Some("Personal credit line".to_string()),
            category: Some(LiabilityCategory::PersonalLoan),
            amount: Some(100_000_000.0),
            interest_rate: Some(5.2),
            ..Default::default()
        })?,
    ];

    let cash_flow = vec![
        CashFlowItem::new(NewCashFlowItem {
            kind: Some(CashFlowType::Income),
            category: Some("Salary".to_string()),
            amount: Some(8_500_000.0),
            frequency: Some(Frequency::Monthly),
        })?,
        CashFlowItem::new(NewCashFlowItem {
            kind: Some(CashFlowType::Income),
            category: Some("Dividends".to_string()),
            amount: Some(1_200_000.0),
            frequency: Some(Frequency::Yearly),
        })?,
        CashFlowItem::new(NewCashFlowItem {
            kind: Some(CashFlowType::Expense),
            category: Some("Housing".to_string()),
            amount: Some(2_500_000.0),
            frequency: Some(Frequency::Monthly),
        })?,
        CashFlowItem::new(NewCashFlowItem {
            kind: Some(CashFlowType::Expense),
            category: Some("Living expenses".to_string()),
            amount: Some(1_500_000.0),
            frequency: Some(Frequency::Monthly),
        })?,
    ];

    Ok(DemoRecords {
        assets,
        liabilities,
        cash_flow,
    })
}
