use std::env;
use std::sync::Arc;

use ai_client::{GeminiClient, GeminiClientConfig};
use backend_api::{run_server, AppState, MemoryPortfolioRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; real environment variables win either way.
    dotenvy::dotenv().ok();

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .unwrap_or(3000);
    let seed_demo = env::var("DEMO_PORTFOLIO").map(|v| v == "1").unwrap_or(false);

    let repo = if seed_demo {
        let records = backend_api::seed::demo_records()?;
        Arc::new(MemoryPortfolioRepository::with_records(
            records.assets,
            records.liabilities,
            records.cash_flow,
        ))
    } else {
        Arc::new(MemoryPortfolioRepository::new())
    };

    let advisor_config = GeminiClientConfig::from_env();
    let advisory_enabled = advisor_config.api_key.is_some();
    let advisor = Arc::new(GeminiClient::new(advisor_config)?);

    println!("Wealth API Server");
    println!("=================");
    println!("Listening on: {}:{}", host, port);
    println!("Demo portfolio: {}", if seed_demo { "seeded" } else { "off" });
    println!(
        "AI advisory: {}",
        if advisory_enabled { "enabled" } else { "not configured" }
    );
    println!();

    run_server(AppState { repo, advisor }, &host, port).await?;

    Ok(())
}
