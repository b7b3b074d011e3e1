use async_trait::async_trait;
use tokio::sync::RwLock;

use models::{Asset, CashFlowItem, Liability, NewAsset, NewCashFlowItem, NewLiability};

use crate::error::{ApiError, Result};

/// Repository trait for the record collections.
/// This abstraction allows swapping the in-memory session store for a
/// persistent implementation without touching the handlers.
#[async_trait]
pub trait PortfolioRepository: Send + Sync {
    async fn list_assets(&self) -> Vec<Asset>;
    async fn add_asset(&self, draft: NewAsset) -> Result<Asset>;
    async fn remove_asset(&self, id: &str) -> Result<()>;

    async fn list_liabilities(&self) -> Vec<Liability>;
    async fn add_liability(&self, draft: NewLiability) -> Result<Liability>;
    async fn remove_liability(&self, id: &str) -> Result<()>;

    async fn list_cash_flow_items(&self) -> Vec<CashFlowItem>;
    async fn add_cash_flow_item(&self, draft: NewCashFlowItem) -> Result<CashFlowItem>;
    async fn remove_cash_flow_item(&self, id: &str) -> Result<()>;
}

#[derive(Debug, Default)]
struct Collections {
    assets: Vec<Asset>,
    liabilities: Vec<Liability>,
    cash_flow: Vec<CashFlowItem>,
}

/// In-memory store for a single interactive session. Insertion order is
/// preserved; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryPortfolioRepository {
    inner: RwLock<Collections>,
}

impl MemoryPortfolioRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the store with pre-built records (demo seed).
    pub fn with_records(
        assets: Vec<Asset>,
        liabilities: Vec<Liability>,
        cash_flow: Vec<CashFlowItem>,
    ) -> Self {
        Self {
            inner: RwLock::new(Collections {
                assets,
                liabilities,
                cash_flow,
            }),
        }
    }
}

#[async_trait]
impl PortfolioRepository for MemoryPortfolioRepository {
    async fn list_assets(&self) -> Vec<Asset> {
        self.inner.read().await.assets.clone()
    }

    async fn add_asset(&self, draft: NewAsset) -> Result<Asset> {
        // Validation happens before the lock is taken; a rejected draft
        // leaves the collection untouched.
        let asset = Asset::new(draft)?;
        self.inner.write().await.assets.push(asset.clone());
        Ok(asset)
    }

    async fn remove_asset(&self, id: &str) -> Result<()> {
        let mut inner = self.inner.write().await;
        let index = inner
            .assets
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| ApiError::AssetNotFound(id.to_string()))?;
        inner.assets.remove(index);
        Ok(())
    }

    async fn list_liabilities(&self) -> Vec<Liability> {
        self.inner.read().await.liabilities.clone()
    }

    async fn add_liability(&self, draft: NewLiability) -> Result<Liability> {
        let liability = Liability::new(draft)?;
        self.inner.write().await.liabilities.push(liability.clone());
        Ok(liability)
    }

    async fn remove_liability(&self, id: &str) -> Result<()> {
        let mut inner = self.inner.write().await;
        let index = inner
            .liabilities
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| ApiError::LiabilityNotFound(id.to_string()))?;
        inner.liabilities.remove(index);
        Ok(())
    }

    async fn list_cash_flow_items(&self) -> Vec<CashFlowItem> {
        self.inner.read().await.cash_flow.clone()
    }

    async fn add_cash_flow_item(&self, draft: NewCashFlowItem) -> Result<CashFlowItem> {
        let item = CashFlowItem::new(draft)?;
        self.inner.write().await.cash_flow.push(item.clone());
        Ok(item)
    }

    async fn remove_cash_flow_item(&self, id: &str) -> Result<()> {
        let mut inner = self.inner.write().await;
        let index = inner
            .cash_flow
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| ApiError::CashFlowItemNotFound(id.to_string()))?;
        inner.cash_flow.remove(index);
        Ok(())
    }
}
