//! OpenAI implementation of the Analyst trait.
//!
//! A reference implementation using chat completions with temperature 0.
//! The pipeline does not depend on it; enable with the `openai` feature.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScreeningError};
use crate::ingest::FounderHint;
use crate::prompts;
use crate::traits::{Analyst, EvidenceJudgement, FetchedPage};
use crate::types::{ClaimCandidate, ExtractionBundle, Finding};

const SYSTEM: &str = "You are a precise analyst for investment screening. Output strict JSON when asked.";

/// OpenAI-backed analyst.
#[derive(Clone)]
pub struct OpenAiAnalyst {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiAnalyst {
    /// Create a new analyst with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: "gpt-4o".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Create from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ScreeningError::analyst("OPENAI_API_KEY not set"))?;
        Ok(Self::new(api_key))
    }

    /// Set the chat model (default: gpt-4o).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (proxies, compatible providers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    async fn chat(&self, user: &str) -> Result<String> {
        #[derive(Serialize)]
        struct ChatMessage<'a> {
            role: &'a str,
            content: &'a str,
        }

        #[derive(Serialize)]
        struct Request<'a> {
            model: &'a str,
            messages: Vec<ChatMessage<'a>>,
            temperature: f32,
        }

        #[derive(Deserialize)]
        struct Response {
            choices: Vec<Choice>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: Message,
        }

        #[derive(Deserialize)]
        struct Message {
            content: String,
        }

        let request = Request {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: 0.0,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(ScreeningError::analyst)?;

        if !response.status().is_success() {
            return Err(ScreeningError::analyst(format!(
                "chat completion returned {}",
                response.status()
            )));
        }

        let parsed: Response = response.json().await.map_err(ScreeningError::analyst)?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| strip_code_fences(&c.message.content))
            .ok_or_else(|| ScreeningError::analyst("chat completion returned no choices"))
    }
}

/// Models wrap JSON in markdown fences; strip them before parsing.
fn strip_code_fences(content: &str) -> String {
    let trimmed = content.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
        .to_string()
}

#[async_trait]
impl Analyst for OpenAiAnalyst {
    async fn extract_bundle(&self, merged_text: &str, hint: &FounderHint) -> Result<String> {
        let hints = serde_json::to_string(hint)?;
        self.chat(&prompts::format_extract_prompt(merged_text, &hints))
            .await
    }

    async fn select_claims(&self, bundle: &ExtractionBundle) -> Result<Vec<ClaimCandidate>> {
        let bundle_json = serde_json::to_string(bundle)?;
        let raw = self
            .chat(&prompts::format_select_claims_prompt(&bundle_json))
            .await?;
        Ok(serde_json::from_str(&raw)?)
    }

    async fn judge_evidence(
        &self,
        claim: &ClaimCandidate,
        page: &FetchedPage,
    ) -> Result<EvidenceJudgement> {
        let raw = self
            .chat(&prompts::format_judge_prompt(
                &claim.claim,
                &page.url,
                &page.content,
            ))
            .await?;
        Ok(serde_json::from_str(&raw)?)
    }

    async fn compose_memo(&self, findings: &[Finding]) -> Result<String> {
        let findings_json = serde_json::to_string(findings)?;
        self.chat(&prompts::format_memo_prompt(&findings_json)).await
    }
}
