//! Advisory gateway: turns aggregated portfolio figures into natural-language
//! prompts for a remote Gemini text-generation endpoint and hands back the
//! resulting prose.
//!
//! From the caller's point of view this client cannot fail. A missing
//! credential, an unreachable service or a malformed response all degrade to
//! a fixed user-facing string; the advisory text is opaque display content,
//! never structured data.

use anyhow::{anyhow, Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use models::Asset;

/// Returned when no API credential is configured.
pub const MSG_NOT_CONFIGURED: &str =
    "AI advisory is not configured. Set GEMINI_API_KEY to enable it.";

/// Returned when the remote service errors or is unreachable.
pub const MSG_UNAVAILABLE: &str =
    "The AI advisory service is currently unavailable. Please try again later.";

/// Returned when there are no stock/crypto holdings worth analyzing.
pub const MSG_NO_HOLDINGS: &str =
    "There are no investment holdings (stocks or crypto) to analyze.";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Configuration for the Gemini endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClientConfig {
    /// Absent key means the gateway answers with [`MSG_NOT_CONFIGURED`]
    /// instead of contacting the service.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl GeminiClientConfig {
    /// Loads config from env vars:
    /// - `GEMINI_API_KEY`  (no default; advisory is disabled without it)
    /// - `GEMINI_MODEL`    (default: `gemini-2.5-flash`)
    /// - `GEMINI_BASE_URL` (default: the public endpoint)
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self {
            api_key,
            model,
            base_url,
        }
    }
}

/// Minimal Gemini `generateContent` client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiClientConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, config })
    }

    /// Analyzes the stock/crypto slice of the portfolio and returns prose,
    /// or a fixed fallback string. Never errors.
    pub async fn analyze_portfolio(&self, assets: &[Asset]) -> String {
        if self.config.api_key.is_none() {
            return MSG_NOT_CONFIGURED.to_string();
        }

        let holdings: Vec<&Asset> = assets
            .iter()
            .filter(|a| a.category.is_position_based())
            .collect();
        if holdings.is_empty() {
            return MSG_NO_HOLDINGS.to_string();
        }

        let prompt = portfolio_prompt(&holdings);
        self.generate(&prompt).await.unwrap_or_else(|_| MSG_UNAVAILABLE.to_string())
    }

    /// Produces goal-oriented allocation advice from the aggregated figures,
    /// or a fixed fallback string. Never errors.
    pub async fn generate_wealth_advice(
        &self,
        net_worth: f64,
        annual_cash_flow: f64,
        assets: &[Asset],
        target_amount: f64,
        target_year: i32,
    ) -> String {
        if self.config.api_key.is_none() {
            return MSG_NOT_CONFIGURED.to_string();
        }

        let prompt = advice_prompt(net_worth, annual_cash_flow, assets, target_amount, target_year);
        self.generate(&prompt).await.unwrap_or_else(|_| MSG_UNAVAILABLE.to_string())
    }

    /// Single-turn generateContent call.
    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("no API key configured"))?;
        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response: GenerateContentResponse = self
            .http
            .post(&endpoint)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("POST {endpoint} failed"))?
            .error_for_status()
            .with_context(|| format!("POST {endpoint} returned non-success status"))?
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {endpoint}"))?;

        let text = extract_text(response).ok_or_else(|| anyhow!("response contained no text"))?;
        Ok(text.trim().to_string())
    }
}

fn portfolio_prompt(holdings: &[&Asset]) -> String {
    let summary = holdings
        .iter()
        .map(|a| {
            let detail = a.details.as_deref().unwrap_or("N/A");
            match a.position {
                Some(p) => format!(
                    "- {} ({}): {} units, current value {}, per-unit cost {}",
                    a.name,
                    detail,
                    p.qty,
                    format_amount(a.value),
                    format_amount(p.cost_basis)
                ),
                None => format!(
                    "- {} ({}): current value {}, cost basis unknown",
                    a.name,
                    detail,
                    format_amount(a.value)
                ),
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a top-tier Wall Street wealth manager. The following are \
         holdings from a VIP client's portfolio.\n\n\
         [Holdings]\n{summary}\n\n\
         Give a brief, sharp assessment of each holding, then a frank \
         evaluation of the portfolio's overall risk and balance. State a \
         buy/hold/sell opinion per holding. Keep the tone professional, \
         courteous and grounded in the numbers."
    )
}

fn advice_prompt(
    net_worth: f64,
    annual_cash_flow: f64,
    assets: &[Asset],
    target_amount: f64,
    target_year: i32,
) -> String {
    let breakdown = assets
        .iter()
        .map(|a| format!("{:?}: {}", a.category, format_amount(a.value)))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Client financial position:\n\
         - Net worth: {}\n\
         - Annual surplus cash flow: {}\n\
         - Asset composition: {breakdown}\n\
         - Goal: reach {} by {target_year}\n\n\
         Assess how achievable the goal is under these figures and propose a \
         concrete allocation adjustment strategy across real estate, equities, \
         bonds and alternatives (gold, crypto), with specific percentages. \
         Write in the tone of a private banker.",
        format_amount(net_worth),
        format_amount(annual_cash_flow),
        format_amount(target_amount)
    )
}

/// Renders an amount with thousands separators, dropping the fraction —
/// prompt text, not accounting output.
fn format_amount(value: f64) -> String {
    let negative = value < 0.0;
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

fn extract_text(response: GenerateContentResponse) -> Option<String> {
    let candidate = response.candidates.into_iter().next()?;
    let text = candidate
        .content?
        .parts
        .into_iter()
        .map(|p| p.text)
        .collect::<Vec<_>>()
        .join("");
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{AssetCategory, NewAsset};

    fn client(api_key: Option<&str>) -> GeminiClient {
        GeminiClient::new(GeminiClientConfig {
            api_key: api_key.map(str::to_string),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
        .unwrap()
    }

    fn stock(name: &str, value: f64, qty: f64, cost_basis: f64) -> Asset {
        Asset::new(NewAsset {
            name: Some(name.to_string()),
            category: Some(AssetCategory::Stock),
            value: Some(value),
            qty: Some(qty),
            cost_basis: Some(cost_basis),
            details: Some("TICK".to_string()),
            ..Default::default()
        })
        .unwrap()
    }

    fn real_estate(name: &str, value: f64) -> Asset {
        Asset::new(NewAsset {
            name: Some(name.to_string()),
            category: Some(AssetCategory::RealEstate),
            value: Some(value),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_analyze_without_key_returns_not_configured() {
        let result = client(None)
            .analyze_portfolio(&[stock("Tesla", 85_000_000.0, 300.0, 180.0)])
            .await;
        assert_eq!(result, MSG_NOT_CONFIGURED);
    }

    #[tokio::test]
    async fn test_analyze_without_holdings_skips_remote_call() {
        // Lump assets only: answered locally, no request is made.
        let result = client(Some("test-key"))
            .analyze_portfolio(&[real_estate("Apartment", 8_500_000_000.0)])
            .await;
        assert_eq!(result, MSG_NO_HOLDINGS);
    }

    #[tokio::test]
    async fn test_advice_without_key_returns_not_configured() {
        let result = client(None)
            .generate_wealth_advice(1_000_000.0, 60_000_000.0, &[], 5_000_000_000.0, 2030)
            .await;
        assert_eq!(result, MSG_NOT_CONFIGURED);
    }

    #[test]
    fn test_portfolio_prompt_lists_each_holding() {
        let samsung = stock("Samsung Electronics", 150_000_000.0, 2000.0, 65_000.0);
        let prompt = portfolio_prompt(&[&samsung]);
        assert!(prompt.contains("Samsung Electronics"));
        assert!(prompt.contains("2000 units"));
        assert!(prompt.contains("150,000,000"));
        assert!(prompt.contains("65,000"));
    }

    #[test]
    fn test_advice_prompt_carries_goal_and_breakdown() {
        let assets = vec![real_estate("Apartment", 8_500_000_000.0)];
        let prompt = advice_prompt(5_400_000_000.0, 60_000_000.0, &assets, 5_000_000_000.0, 2030);
        assert!(prompt.contains("5,400,000,000"));
        assert!(prompt.contains("RealEstate: 8,500,000,000"));
        assert!(prompt.contains("reach 5,000,000,000 by 2030"));
    }

    #[test]
    fn test_format_amount_groups_thousands() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(1_000.0), "1,000");
        assert_eq!(format_amount(8_500_000_000.0), "8,500,000,000");
        assert_eq!(format_amount(-1_234_567.0), "-1,234,567");
    }

    #[test]
    fn test_extract_text_joins_parts_and_rejects_empty() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Hold "},{"text":"steady."}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "Hold steady.");

        let empty: GenerateContentResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert_eq!(extract_text(empty), None);
    }
}
