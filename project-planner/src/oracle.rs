//! Completion client: prompt in, raw text out
//!
//! The model is an opaque oracle. A failed call is not an error here; it is
//! reported as [`RawCompletion::Absent`] and handled by the pipeline's
//! fallback path.

use anyhow::Context;
use async_trait::async_trait;
use project_planner_sdk::log_oracle_unavailable;
use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;

/// Text returned by the oracle for one prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawCompletion {
    Text(String),
    Absent,
}

impl RawCompletion {
    /// Blank text counts as absent
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            RawCompletion::Absent
        } else {
            RawCompletion::Text(text)
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            RawCompletion::Text(text) => Some(text),
            RawCompletion::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, RawCompletion::Absent)
    }
}

/// A text-completion oracle
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// One outbound call; never fails, absence is a normal outcome
    async fn complete(&self, prompt: &str) -> RawCompletion;
}

// ============================================================================
// Gemini
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResponsePart {
    text: Option<String>,
}

/// Join the text parts of the first candidate
///
/// An undecodable body is an error; a decodable body without text is
/// [`RawCompletion::Absent`].
fn extract_text(body: &str) -> anyhow::Result<RawCompletion> {
    let response: GenerateResponse =
        serde_json::from_str(body).context("undecodable response body")?;

    let text: String = response
        .candidates
        .first()
        .map(|candidate| {
            candidate
                .content
                .parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .collect()
        })
        .unwrap_or_default();

    Ok(RawCompletion::from_text(text))
}

/// Google Gemini `generateContent` client
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            api_base: api_base.into(),
        }
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(&config.api_key, &config.model, &config.api_base)
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }

    async fn send(&self, prompt: &str) -> anyhow::Result<RawCompletion> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Gemini API error {}: {}",
                status,
                error_text.chars().take(200).collect::<String>()
            ));
        }

        extract_text(&response.text().await?)
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> RawCompletion {
        if self.api_key.is_empty() {
            log_oracle_unavailable!("GEMINI_API_KEY is not set");
            return RawCompletion::Absent;
        }

        match self.send(prompt).await {
            Ok(RawCompletion::Absent) => {
                log_oracle_unavailable!("empty completion");
                RawCompletion::Absent
            }
            Ok(completion) => completion,
            Err(e) => {
                log_oracle_unavailable!(format!("{:#}", e));
                RawCompletion::Absent
            }
        }
    }
}
