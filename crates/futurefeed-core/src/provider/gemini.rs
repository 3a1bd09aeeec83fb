//! Gemini-backed feed generation.
//!
//! Calls the `generateContent` API with a JSON response schema and converts
//! every failure mode into fallback content at this boundary. A missing
//! credential short-circuits before any network access.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{FeedBatch, FeedProvider, ProviderError};
use crate::config::ProviderConfig;
use crate::feed::{FeedItem, FeedItemKind};
use crate::goal::Goal;

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const SYSTEM_INSTRUCTION: &str = "You are a 'Future Self' assistant. Your job is to interrupt \
     doom-scrolling with high-value micro-learning related to the user's specific goals.";

pub struct GeminiFeedProvider {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiFeedProvider {
    /// Build a provider from configuration, resolving the credential through
    /// the environment variable named there, then the OS keyring.
    pub fn from_config(cfg: &ProviderConfig) -> Self {
        Self::new(
            crate::auth::api_key(cfg),
            cfg.model.clone(),
            Duration::from_secs(cfg.timeout_secs),
        )
    }

    pub fn new(api_key: Option<String>, model: String, timeout: Duration) -> Self {
        Self::with_base_url(api_key, model, API_BASE_URL.to_string(), timeout)
    }

    /// Like [`GeminiFeedProvider::new`] with an explicit endpoint, so tests
    /// can point the provider at a local mock server.
    pub fn with_base_url(
        api_key: Option<String>,
        model: String,
        base_url: String,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            api_key,
            model,
            base_url,
        }
    }

    async fn request_feed(
        &self,
        api_key: &str,
        goal: &Goal,
        count: usize,
    ) -> Result<Vec<FeedItem>, ProviderError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user".into(),
                parts: vec![TextPart {
                    text: build_prompt(goal, count),
                }],
            }],
            system_instruction: SystemInstruction {
                parts: vec![TextPart {
                    text: SYSTEM_INSTRUCTION.into(),
                }],
            },
            generation_config: GenerationConfig {
                response_mime_type: "application/json".into(),
                response_schema: response_schema(),
            },
        };

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ProviderError::Status(resp.status().as_u16()));
        }

        let parsed: GenerateResponse = resp.json().await?;
        let text = parsed
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .and_then(|p| p.text.as_deref())
            .ok_or(ProviderError::EmptyResponse)?;

        let raw: Vec<RawFeedItem> = serde_json::from_str(text)?;
        if raw.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        let items: Vec<FeedItem> = raw.into_iter().map(FeedItem::from).collect();
        if items.iter().any(|item| !item.is_well_formed()) {
            return Err(ProviderError::MalformedItem);
        }
        Ok(items)
    }
}

#[async_trait]
impl FeedProvider for GeminiFeedProvider {
    async fn fetch_feed(&self, goal: &Goal, count: usize) -> FeedBatch {
        let Some(api_key) = self.api_key.as_deref().filter(|k| !k.is_empty()) else {
            return FeedBatch::missing_credential();
        };
        match self.request_feed(api_key, goal, count.max(1)).await {
            Ok(items) => FeedBatch::generated(items),
            Err(_) => FeedBatch::failure(),
        }
    }
}

fn build_prompt(goal: &Goal, count: usize) -> String {
    format!(
        "The user has a goal: \"{statement}\" (focus area: {category}).\n\
         Generate {count} distinct, bite-sized educational feed items that help them achieve this goal.\n\
         The tone should be \"Social Media Style\" - fast, engaging, and high-value.\n\
         Mix up the types: Quiz, Interesting Fact, or a powerful Analogy.\n\
         Make it feel like a TikTok caption or a Twitter thread hook.",
        statement = goal.statement,
        category = goal.category.label(),
    )
}

/// Response schema sent to the API so the model emits a parseable item array.
fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "headline": {
                    "type": "STRING",
                    "description": "A short, catchy hook title (under 10 words)."
                },
                "type": {
                    "type": "STRING",
                    "enum": ["quiz", "fact", "analogy"],
                    "description": "The type of educational content."
                },
                "content": {
                    "type": "STRING",
                    "description": "The main educational body text. Keep it punchy (under 40 words)."
                },
                "options": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "If type is quiz, provide 3-4 options. Otherwise empty."
                },
                "correctAnswer": {
                    "type": "STRING",
                    "description": "If type is quiz, the correct option string."
                },
                "explanation": {
                    "type": "STRING",
                    "description": "A very brief explanation of why the answer is correct or the fact matters (under 20 words)."
                }
            },
            "required": ["headline", "type", "content", "explanation"]
        }
    })
}

// ── API types ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "systemInstruction")]
    system_instruction: SystemInstruction,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<TextPart>,
}

#[derive(Serialize)]
struct SystemInstruction {
    parts: Vec<TextPart>,
}

#[derive(Serialize)]
struct TextPart {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Wire shape of one generated item, before ids are assigned.
#[derive(Deserialize)]
struct RawFeedItem {
    headline: String,
    #[serde(rename = "type")]
    kind: FeedItemKind,
    content: String,
    #[serde(default)]
    options: Vec<String>,
    #[serde(rename = "correctAnswer")]
    correct_answer: Option<String>,
    explanation: String,
}

impl From<RawFeedItem> for FeedItem {
    fn from(raw: RawFeedItem) -> Self {
        let is_quiz = raw.kind == FeedItemKind::Quiz;
        FeedItem {
            id: uuid::Uuid::new_v4().to_string(),
            kind: raw.kind,
            headline: raw.headline,
            content: raw.content,
            explanation: raw.explanation,
            // Option fields are quiz-only; anything else the model attached
            // to other kinds is dropped here.
            options: if is_quiz { raw.options } else { Vec::new() },
            correct_answer: if is_quiz { raw.correct_answer } else { None },
        }
    }
}
