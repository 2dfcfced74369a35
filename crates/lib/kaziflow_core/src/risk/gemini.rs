//! Gemini risk-scoring provider.
//!
//! Calls `generateContent` with a JSON response schema so the model
//! returns a machine-parseable `RiskAnalysis`.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::{RiskAnalysis, RiskError, VendorSnapshot};

const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: String,
}

fn build_prompt(snapshot: &VendorSnapshot) -> String {
    format!(
        "Analyze the following vendor supply chain data and provide a fintech \
         risk score (0-100). A higher score means LOWER risk (safer).\n\n\
         Data: {}\n\n\
         Consider:\n\
         - Transaction frequency\n\
         - Payment delay history\n\
         - Delivery consistency\n\
         - FIFO (First-In-First-Out) transaction flow health\n\n\
         Return a valid JSON object with:\n\
         - score (number)\n\
         - level (string: Low, Medium, High)\n\
         - reasoning (string)\n\
         - factors (list of objects with label and impact)",
        serde_json::to_string(snapshot).unwrap_or_default()
    )
}

/// Score a vendor snapshot via Gemini.
pub async fn score_vendor(
    client: &Client,
    api_key: &str,
    snapshot: &VendorSnapshot,
) -> Result<RiskAnalysis, RiskError> {
    let body = json!({
        "contents": [{"parts": [{"text": build_prompt(snapshot)}]}],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "score": {"type": "NUMBER"},
                    "level": {"type": "STRING"},
                    "reasoning": {"type": "STRING"},
                    "factors": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "label": {"type": "STRING"},
                                "impact": {"type": "NUMBER"}
                            }
                        }
                    }
                }
            }
        }
    });

    let resp = client
        .post(GEMINI_API_URL)
        .header("x-goog-api-key", api_key)
        .json(&body)
        .send()
        .await
        .map_err(|e| RiskError::Provider(format!("Gemini request failed: {e}")))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_else(|_| "<no body>".to_string());
        return Err(RiskError::Provider(format!(
            "Gemini scoring failed: {status} {body}"
        )));
    }

    let data: GenerateContentResponse = resp
        .json()
        .await
        .map_err(|e| RiskError::Provider(format!("Gemini response parse error: {e}")))?;

    let text = data
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text)
        .ok_or_else(|| RiskError::Provider("Gemini returned no candidates".to_string()))?;

    serde_json::from_str(&text)
        .map_err(|e| RiskError::Provider(format!("Gemini returned invalid JSON: {e}")))
}
