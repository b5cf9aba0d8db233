//! Chat collaborator backed by a Gemini-style generateContent endpoint.
//!
//! From the caller's point of view `advice` always succeeds: transport,
//! provider, and parse failures all collapse into a fixed fallback
//! reply. The call is slow and must only ever run inside a spawned
//! task, never on the logic thread itself.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Config;
use crate::{dlog_debug, dlog_warn, Error, Result};

/// Reply shown for any failure along the request path.
pub const FALLBACK_REPLY: &str =
    "Error: Unable to connect to the AI assistant. Please check your network or API configuration.";

/// Opening message seeded into the chat transcript.
pub const GREETING: &str = "Hello! I'm your AWS Decommission Assistant. How can I help you meet \
    the Feb 26 deadline? I can suggest migration strategies, check-lists, or cleanup commands.";

const SYSTEM_INSTRUCTION: &str = "You are an expert AWS Solutions Architect specializing in \
    cloud migrations and decommission activities. Your goal is to help a team meet their Feb 26 \
    decommission deadline for 'AWS 1.0'. Provide concise, actionable, and technical advice. \
    Use markdown for formatting.";

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Who authored a chat transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Model,
}

/// One entry in the chat panel transcript.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: &str) -> Self {
        Self {
            role: ChatRole::User,
            content: content.to_string(),
        }
    }

    pub fn model(content: &str) -> Self {
        Self {
            role: ChatRole::Model,
            content: content.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "systemInstruction")]
    system_instruction: Content,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// HTTP client for the advice endpoint.
#[derive(Debug, Clone)]
pub struct Assistant {
    client: reqwest::Client,
    base: String,
    model: String,
    api_key: Option<String>,
}

impl Assistant {
    pub fn new(base: Option<&str>, model: &str, api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            base: base.unwrap_or(DEFAULT_API_BASE).trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_base.as_deref(), &config.api_model, Config::api_key())
    }

    /// Ask for decommission advice. Never fails: any error along the
    /// way becomes the fixed fallback reply.
    pub async fn advice(&self, prompt: &str) -> String {
        match self.request(prompt).await {
            Ok(text) => text,
            Err(err) => {
                dlog_warn!("assistant request failed: {}", err);
                FALLBACK_REPLY.to_string()
            }
        }
    }

    async fn request(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Assistant("GEMINI_API_KEY not set".to_string()))?;
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base, self.model, api_key
        );

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            system_instruction: Content {
                parts: vec![Part {
                    text: SYSTEM_INSTRUCTION.to_string(),
                }],
            },
        };

        dlog_debug!("assistant: POST model={}", self.model);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        let parsed: GenerateResponse = response.json().await?;

        parsed
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .map(|p| p.text)
            .reduce(|mut acc, t| {
                acc.push_str(&t);
                acc
            })
            .filter(|text| !text.is_empty())
            .ok_or_else(|| Error::Assistant("empty response".to_string()))
    }
}
