use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{self, AppState};

/// Create the main application router with all API endpoints
pub fn create_router(state: AppState) -> Router {
    // Create CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Derived aggregates
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/cashflow/summary", get(handlers::get_cash_flow_summary))
        // Record collections
        .route(
            "/api/assets",
            get(handlers::list_assets).post(handlers::create_asset),
        )
        .route("/api/assets/:id", delete(handlers::delete_asset))
        .route(
            "/api/liabilities",
            get(handlers::list_liabilities).post(handlers::create_liability),
        )
        .route("/api/liabilities/:id", delete(handlers::delete_liability))
        .route(
            "/api/cashflow",
            get(handlers::list_cash_flow_items).post(handlers::create_cash_flow_item),
        )
        .route("/api/cashflow/:id", delete(handlers::delete_cash_flow_item))
        // Simulation and advisory
        .route("/api/projection", post(handlers::post_projection))
        .route("/api/advice", post(handlers::post_advice))
        .route("/api/portfolio/analysis", post(handlers::post_portfolio_analysis))
        // Add shared state
        .with_state(state)
        // Add middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryPortfolioRepository;
    use ai_client::{GeminiClient, GeminiClientConfig, MSG_NOT_CONFIGURED};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use chrono::Datelike;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let advisor = GeminiClient::new(GeminiClientConfig {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            base_url: "http://localhost:0".to_string(),
        })
        .unwrap();
        create_router(AppState {
            repo: Arc::new(MemoryPortfolioRepository::new()),
            advisor: Arc::new(advisor),
        })
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_asset_then_summary() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(json_post(
                "/api/assets",
                r#"{"name":"Deposit","category":"Deposit","value":4000}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(json_post(
                "/api/liabilities",
                r#"{"name":"Loan","category":"PersonalLoan","amount":1000,"interestRate":5.2}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/summary")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let summary = body_json(response).await;
        assert_eq!(summary["totalAssets"], 4000.0);
        assert_eq!(summary["totalLiabilities"], 1000.0);
        assert_eq!(summary["netWorth"], 3000.0);
        assert_eq!(summary["leverageRatio"], 25.0);
        assert_eq!(summary["allocation"][0]["category"], "Deposit");
    }

    #[tokio::test]
    async fn test_invalid_draft_is_unprocessable_and_uncommitted() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(json_post("/api/assets", r#"{"category":"Deposit"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/assets")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let assets = body_json(response).await;
        assert_eq!(assets.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/liabilities/no-such-id")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_projection_zero_return_from_empty_portfolio() {
        let target_year = chrono::Local::now().year();
        let body = format!(
            r#"{{"targetYear":{target_year},"targetAmount":1000000,
                 "annualReturnPct":0,"monthlyContribution":100}}"#
        );

        let response = test_app()
            .oneshot(json_post("/api/projection", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let points = body_json(response).await;
        let points = points.as_array().unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0]["projectedNetWorth"], 0.0);
        assert_eq!(points[1]["projectedNetWorth"], 1200.0);
        assert_eq!(points[2]["projectedNetWorth"], 2400.0);
        assert_eq!(points[2]["targetAmount"], 1000000.0);
    }

    #[tokio::test]
    async fn test_analysis_degrades_without_credential() {
        let response = test_app()
            .oneshot(json_post("/api/portfolio/analysis", "{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["analysis"], MSG_NOT_CONFIGURED);
    }
}
