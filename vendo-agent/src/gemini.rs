use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

const GENERATE_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("model call failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("model returned no text")]
    EmptyResponse,
}

/// Thin client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_key,
            model,
        })
    }

    /// Run one prompt and return the first non-empty candidate text.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            GENERATE_BASE, self.model, self.api_key
        );
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response: GenerateResponse = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response
            .candidates
            .into_iter()
            .flat_map(|c| c.content.parts)
            .map(|p| p.text)
            .find(|text| !text.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)
    }
}
