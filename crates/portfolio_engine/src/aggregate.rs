//! Portfolio aggregation: totals, net worth, leverage and per-category
//! allocation. All operations tolerate empty input and return the neutral
//! element.

use std::collections::BTreeMap;

use models::{Asset, AssetCategory, Liability};

/// Sum of current market values. 0.0 for an empty portfolio.
pub fn total_value(assets: &[Asset]) -> f64 {
    assets.iter().map(|a| a.value).sum()
}

/// Sum of outstanding balances. 0.0 for an empty list.
pub fn total_amount(liabilities: &[Liability]) -> f64 {
    liabilities.iter().map(|l| l.amount).sum()
}

/// Total assets minus total liabilities. Negative when over-indebted.
pub fn net_worth(assets: &[Asset], liabilities: &[Liability]) -> f64 {
    total_value(assets) - total_amount(liabilities)
}

/// Liabilities as a percentage of assets, unclamped (may exceed 100).
///
/// Returns 0.0 when total assets are zero, even if liabilities exist. This
/// mirrors the reference behavior; the tradeoff is recorded in DESIGN.md.
pub fn leverage_ratio(assets: &[Asset], liabilities: &[Liability]) -> f64 {
    let assets_total = total_value(assets);
    if assets_total == 0.0 {
        return 0.0;
    }
    total_amount(liabilities) / assets_total * 100.0
}

/// Groups assets by category and sums their values. Categories with no
/// matching assets are omitted. Iteration order is category declaration
/// order (the enum's `Ord`).
pub fn allocation_by_category(assets: &[Asset]) -> BTreeMap<AssetCategory, f64> {
    let mut allocation = BTreeMap::new();
    for asset in assets {
        *allocation.entry(asset.category).or_insert(0.0) += asset.value;
    }
    allocation
}

/// Unrealized gain (`value - cost_basis * qty`) for position-based holdings.
/// `None` for assets without a position — by construction that means every
/// non-stock/crypto asset.
pub fn unrealized_gain(asset: &Asset) -> Option<f64> {
    let position = asset.position?;
    Some(asset.value - position.cost_basis * position.qty)
}

/// Gain as a percentage of the acquisition cost. `None` when the gain is
/// undefined or the cost basis is zero (nothing to divide by).
pub fn unrealized_gain_percent(asset: &Asset) -> Option<f64> {
    let gain = unrealized_gain(asset)?;
    let position = asset.position?;
    let basis = position.cost_basis * position.qty;
    if basis > 0.0 {
        Some(gain / basis * 100.0)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{Currency, LiabilityCategory, NewAsset, NewLiability};

    fn asset(name: &str, category: AssetCategory, value: f64) -> Asset {
        Asset::new(NewAsset {
            name: Some(name.to_string()),
            category: Some(category),
            value: Some(value),
            ..Default::default()
        })
        .unwrap()
    }

    fn stock(name: &str, value: f64, qty: f64, cost_basis: f64) -> Asset {
        Asset::new(NewAsset {
            name: Some(name.to_string()),
            category: Some(AssetCategory::Stock),
            value: Some(value),
            currency: Some(Currency::Krw),
            qty: Some(qty),
            cost_basis: Some(cost_basis),
            ..Default::default()
        })
        .unwrap()
    }

    fn liability(name: &str, amount: f64) -> Liability {
        Liability::new(NewLiability {
            name: Some(name.to_string()),
            category: Some(LiabilityCategory::Mortgage),
            amount: Some(amount),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_totals_on_empty_collections() {
        assert_eq!(total_value(&[]), 0.0);
        assert_eq!(total_amount(&[]), 0.0);
        assert_eq!(net_worth(&[], &[]), 0.0);
    }

    #[test]
    fn test_total_value_sums_all_assets() {
        let assets = vec![
            asset("Apartment", AssetCategory::RealEstate, 8_500_000_000.0),
            asset("Gold bars", AssetCategory::Gold, 50_000_000.0),
        ];
        assert_eq!(total_value(&assets), 8_550_000_000.0);
    }

    #[test]
    fn test_net_worth_can_go_negative() {
        let assets = vec![asset("Deposit", AssetCategory::Deposit, 100.0)];
        let liabilities = vec![liability("Loan", 250.0)];
        assert_eq!(net_worth(&assets, &liabilities), -150.0);
    }

    #[test]
    fn test_leverage_ratio_guards_zero_assets() {
        let liabilities = vec![liability("Loan", 1_000_000.0)];
        assert_eq!(leverage_ratio(&[], &liabilities), 0.0);
    }

    #[test]
    fn test_leverage_ratio_unclamped() {
        let assets = vec![asset("Deposit", AssetCategory::Deposit, 1000.0)];
        let liabilities = vec![liability("Loan", 1500.0)];
        assert_eq!(leverage_ratio(&assets, &liabilities), 150.0);
    }

    #[test]
    fn test_leverage_ratio_basic() {
        let assets = vec![asset("Deposit", AssetCategory::Deposit, 4000.0)];
        let liabilities = vec![liability("Loan", 1000.0)];
        assert_eq!(leverage_ratio(&assets, &liabilities), 25.0);
    }

    #[test]
    fn test_allocation_groups_and_omits_empty_categories() {
        let assets = vec![
            stock("Samsung Electronics", 150_000_000.0, 2000.0, 65_000.0),
            stock("Tesla", 85_000_000.0, 300.0, 180.0),
            asset("Gold bars", AssetCategory::Gold, 50_000_000.0),
        ];
        let allocation = allocation_by_category(&assets);
        assert_eq!(allocation.len(), 2);
        assert_eq!(allocation[&AssetCategory::Stock], 235_000_000.0);
        assert_eq!(allocation[&AssetCategory::Gold], 50_000_000.0);
        assert!(!allocation.contains_key(&AssetCategory::RealEstate));
    }

    #[test]
    fn test_unrealized_gain_worked_example() {
        // qty 2000 at cost 65,000 against a current value of 150,000,000
        let holding = stock("Samsung Electronics", 150_000_000.0, 2000.0, 65_000.0);
        assert_eq!(unrealized_gain(&holding), Some(20_000_000.0));
        let pct = unrealized_gain_percent(&holding).unwrap();
        assert!((pct - 15.384615).abs() < 1e-4);
    }

    #[test]
    fn test_unrealized_gain_undefined_without_position() {
        let lump = asset("Gold bars", AssetCategory::Gold, 50_000_000.0);
        assert_eq!(unrealized_gain(&lump), None);
        assert_eq!(unrealized_gain_percent(&lump), None);
    }

    #[test]
    fn test_gain_percent_undefined_on_zero_cost_basis() {
        let airdrop = stock("Airdrop", 1_000_000.0, 100.0, 0.0);
        assert_eq!(unrealized_gain(&airdrop), Some(1_000_000.0));
        assert_eq!(unrealized_gain_percent(&airdrop), None);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let assets = vec![
            stock("Samsung Electronics", 150_000_000.0, 2000.0, 65_000.0),
            asset("Gold bars", AssetCategory::Gold, 50_000_000.0),
        ];
        let liabilities = vec![liability("Loan", 3_000_000_000.0)];
        assert_eq!(
            net_worth(&assets, &liabilities).to_bits(),
            net_worth(&assets, &liabilities).to_bits()
        );
        assert_eq!(
            allocation_by_category(&assets),
            allocation_by_category(&assets)
        );
    }
}
