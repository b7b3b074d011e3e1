use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use ai_client::GeminiClient;
use models::{Asset, AssetCategory, NewAsset, NewCashFlowItem, NewLiability};
use portfolio_engine::{
    allocation_by_category, leverage_ratio, monthly_totals, net_worth, project, savings_rate,
    total_amount, total_value, unrealized_gain, unrealized_gain_percent, ProjectionPoint,
};

use crate::{repository::PortfolioRepository, Result};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn PortfolioRepository>,
    pub advisor: Arc<GeminiClient>,
}

/// One slice of the allocation donut, in category declaration order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSlice {
    pub category: AssetCategory,
    pub value: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub net_worth: f64,
    pub leverage_ratio: f64,
    pub allocation: Vec<AllocationSlice>,
}

/// GET /api/summary
/// Totals, net worth, leverage and the per-category allocation, recomputed
/// from scratch on every call.
pub async fn get_summary(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let assets = state.repo.list_assets().await;
    let liabilities = state.repo.list_liabilities().await;

    let allocation = allocation_by_category(&assets)
        .into_iter()
        .map(|(category, value)| AllocationSlice { category, value })
        .collect();

    Ok(Json(SummaryResponse {
        total_assets: total_value(&assets),
        total_liabilities: total_amount(&liabilities),
        net_worth: net_worth(&assets, &liabilities),
        leverage_ratio: leverage_ratio(&assets, &liabilities),
        allocation,
    }))
}

/// Asset as listed, enriched with the derived gain figures. Gains are
/// absent (not zero) for lump-valued assets and zero-cost positions.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetView {
    #[serde(flatten)]
    pub asset: Asset,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unrealized_gain: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unrealized_gain_percent: Option<f64>,
}

/// GET /api/assets
pub async fn list_assets(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let views: Vec<AssetView> = state
        .repo
        .list_assets()
        .await
        .into_iter()
        .map(|asset| AssetView {
            unrealized_gain: unrealized_gain(&asset),
            unrealized_gain_percent: unrealized_gain_percent(&asset),
            asset,
        })
        .collect();
    Ok(Json(views))
}

/// POST /api/assets
pub async fn create_asset(
    State(state): State<AppState>,
    Json(draft): Json<NewAsset>,
) -> Result<impl IntoResponse> {
    let asset = state.repo.add_asset(draft).await?;
    Ok((StatusCode::CREATED, Json(asset)))
}

/// DELETE /api/assets/:id
pub async fn delete_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.repo.remove_asset(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/liabilities
pub async fn list_liabilities(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(state.repo.list_liabilities().await))
}

/// POST /api/liabilities
pub async fn create_liability(
    State(state): State<AppState>,
    Json(draft): Json<NewLiability>,
) -> Result<impl IntoResponse> {
    let liability = state.repo.add_liability(draft).await?;
    Ok((StatusCode::CREATED, Json(liability)))
}

/// DELETE /api/liabilities/:id
pub async fn delete_liability(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.repo.remove_liability(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/cashflow
pub async fn list_cash_flow_items(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(state.repo.list_cash_flow_items().await))
}

/// POST /api/cashflow
pub async fn create_cash_flow_item(
    State(state): State<AppState>,
    Json(draft): Json<NewCashFlowItem>,
) -> Result<impl IntoResponse> {
    let item = state.repo.add_cash_flow_item(draft).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// DELETE /api/cashflow/:id
pub async fn delete_cash_flow_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.repo.remove_cash_flow_item(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowSummaryResponse {
    pub monthly_income: f64,
    pub monthly_expense: f64,
    pub monthly_surplus: f64,
    /// Absent when there is no income to divide by. The raw value is
    /// signed; clients decide whether to show a negative rate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_rate: Option<f64>,
}

/// GET /api/cashflow/summary
pub async fn get_cash_flow_summary(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let items = state.repo.list_cash_flow_items().await;
    let totals = monthly_totals(&items);
    Ok(Json(CashFlowSummaryResponse {
        monthly_income: totals.income,
        monthly_expense: totals.expense,
        monthly_surplus: totals.surplus,
        savings_rate: savings_rate(&totals),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionRequest {
    pub target_year: i32,
    pub target_amount: f64,
    pub annual_return_pct: f64,
    pub monthly_contribution: f64,
}

/// POST /api/projection
/// The current calendar year is resolved here, at the boundary, and passed
/// into the engine as data.
pub async fn post_projection(
    State(state): State<AppState>,
    Json(request): Json<ProjectionRequest>,
) -> Result<Json<Vec<ProjectionPoint>>> {
    let assets = state.repo.list_assets().await;
    let liabilities = state.repo.list_liabilities().await;
    let current_year = chrono::Local::now().year();

    let points = project(
        net_worth(&assets, &liabilities),
        current_year,
        request.target_year,
        request.target_amount,
        request.annual_return_pct,
        request.monthly_contribution * 12.0,
    );
    Ok(Json(points))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceRequest {
    pub target_year: i32,
    pub target_amount: f64,
    /// Planned monthly savings. When omitted, the normalized cash-flow
    /// surplus stands in.
    pub monthly_contribution: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    pub advice: String,
}

/// POST /api/advice
pub async fn post_advice(
    State(state): State<AppState>,
    Json(request): Json<AdviceRequest>,
) -> Result<impl IntoResponse> {
    let assets = state.repo.list_assets().await;
    let liabilities = state.repo.list_liabilities().await;

    let annual_cash_flow = match request.monthly_contribution {
        Some(monthly) => monthly * 12.0,
        None => {
            let items = state.repo.list_cash_flow_items().await;
            monthly_totals(&items).surplus * 12.0
        }
    };

    let advice = state
        .advisor
        .generate_wealth_advice(
            net_worth(&assets, &liabilities),
            annual_cash_flow,
            &assets,
            request.target_amount,
            request.target_year,
        )
        .await;
    Ok(Json(AdviceResponse { advice }))
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis: String,
}

/// POST /api/portfolio/analysis
pub async fn post_portfolio_analysis(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let assets = state.repo.list_assets().await;
    let analysis = state.advisor.analyze_portfolio(&assets).await;
    Ok(Json(AnalysisResponse { analysis }))
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "wealth-api"
    }))
}
