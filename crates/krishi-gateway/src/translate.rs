//! Translation client with a fail-open fallback.
//!
//! One call per (text, target language) pair. Any failure -- transport,
//! status, or a response without the expected field -- returns the
//! original text unchanged, with the cause logged.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use krishi_core::config::TranslationConfig;

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText", default)]
    translated_text: Option<String>,
}

/// Thin bridge to the translation endpoint.
pub struct Translator {
    client: Client,
    config: TranslationConfig,
}

impl Translator {
    pub fn new(config: TranslationConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Translate `text` to `target`, returning the original text on any
    /// failure (fail-open).
    pub async fn translate(&self, text: &str, target: &str) -> String {
        match self.try_translate(text, target).await {
            Ok(translated) => translated,
            Err(cause) => {
                warn!(%cause, language = target, "Translation failed; returning original text");
                text.to_string()
            }
        }
    }

    async fn try_translate(&self, text: &str, target: &str) -> Result<String, String> {
        let request = TranslateRequest {
            q: text,
            source: &self.config.source,
            target,
            format: "text",
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("status {}", response.status()));
        }

        let parsed: TranslateResponse = response.json().await.map_err(|e| e.to_string())?;
        parsed
            .translated_text
            .ok_or_else(|| "response missing translatedText".to_string())
    }
}
