//! Generative-language assistant client.
//!
//! Issues exactly one `generateContent`-style request per turn. The
//! response is a nested candidate structure; the first candidate's first
//! part text is extracted. A response that arrives without the expected
//! structure yields a canned fallback string rather than an error, so
//! only transport and status failures surface to the caller.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use krishi_chat::AssistantBackend;
use krishi_core::config::AssistantConfig;
use krishi_core::{FarmerProfile, KrishiError, Language, Result};

use crate::prompt::build_system_instruction;

/// Local recovery string used when the response structure is missing the
/// expected candidate text. This is not surfaced as an error.
pub const PROCESSING_FALLBACK: &str = "Sorry, I couldn't process that request.";

// -- Request body --

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "systemInstruction")]
    system_instruction: Content,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct Tool {
    #[serde(rename = "googleSearch")]
    google_search: serde_json::Value,
}

// -- Response body --

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateResponse {
    /// First candidate's first part text, or the canned fallback when any
    /// link in the chain is absent.
    fn extract_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| PROCESSING_FALLBACK.to_string())
    }
}

/// Stateless bridge to the external generative-language endpoint.
pub struct GenerativeAssistant {
    client: Client,
    config: AssistantConfig,
}

impl GenerativeAssistant {
    pub fn new(config: AssistantConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn request_url(&self, api_key: &str) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.config.endpoint, self.config.model, api_key
        )
    }

    fn build_request(
        &self,
        utterance: &str,
        language: Language,
        profile: &FarmerProfile,
    ) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(utterance.to_string()),
                }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: Some(build_system_instruction(profile, language)),
                }],
            },
            tools: self.config.search_augmentation.then(|| {
                vec![Tool {
                    google_search: serde_json::json!({}),
                }]
            }),
        }
    }
}

#[async_trait]
impl AssistantBackend for GenerativeAssistant {
    async fn ask(
        &self,
        utterance: &str,
        language: Language,
        profile: &FarmerProfile,
    ) -> Result<String> {
        let api_key = self
            .config
            .resolved_api_key()
            .ok_or_else(|| KrishiError::Assistant("no API key configured".to_string()))?;

        let body = self.build_request(utterance, language, profile);
        debug!(model = %self.config.model, %language, "Sending assistant request");

        let response = self
            .client
            .post(self.request_url(&api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| KrishiError::Assistant(e.to_string()))?;

        if !response.status().is_success() {
            return Err(KrishiError::Assistant(format!(
                "request failed with status {}",
                response.status()
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| KrishiError::Assistant(e.to_string()))?;

        Ok(parsed.extract_text())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GenerateResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_extract_text_happy_path() {
        let response = parse(
            r#"{"candidates":[{"content":{"parts":[{"text":"Sow wheat in November."}]}}]}"#,
        );
        assert_eq!(response.extract_text(), "Sow wheat in November.");
    }

    #[test]
    fn test_extract_text_uses_first_candidate_and_part() {
        let response = parse(
            r#"{"candidates":[
                {"content":{"parts":[{"text":"first"},{"text":"second"}]}},
                {"content":{"parts":[{"text":"other candidate"}]}}
            ]}"#,
        );
        assert_eq!(response.extract_text(), "first");
    }

    #[test]
    fn test_extract_text_missing_candidates_falls_back() {
        let response = parse(r#"{"candidates":[]}"#);
        assert_eq!(response.extract_text(), PROCESSING_FALLBACK);

        let response = parse(r#"{}"#);
        assert_eq!(response.extract_text(), PROCESSING_FALLBACK);
    }

    #[test]
    fn test_extract_text_missing_content_falls_back() {
        let response = parse(r#"{"candidates":[{}]}"#);
        assert_eq!(response.extract_text(), PROCESSING_FALLBACK);
    }

    #[test]
    fn test_extract_text_missing_part_text_falls_back() {
        let response = parse(r#"{"candidates":[{"content":{"parts":[{}]}}]}"#);
        assert_eq!(response.extract_text(), PROCESSING_FALLBACK);
    }

    #[test]
    fn test_extract_text_empty_string_falls_back() {
        let response = parse(r#"{"candidates":[{"content":{"parts":[{"text":""}]}}]}"#);
        assert_eq!(response.extract_text(), PROCESSING_FALLBACK);
    }

    #[test]
    fn test_request_body_shape() {
        let assistant = GenerativeAssistant::new(AssistantConfig::default());
        let request = assistant.build_request(
            "What crops should I plant?",
            Language::Hindi,
            &FarmerProfile::default(),
        );

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json["contents"][0]["parts"][0]["text"],
            "What crops should I plant?"
        );
        assert_eq!(json["contents"][0]["role"], "user");
        let instruction = json["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap();
        assert!(instruction.contains("Krishi Sahayak"));
        assert!(instruction.contains("Respond in Hindi."));
        // Search augmentation flag is on by default.
        assert!(json["tools"][0].get("googleSearch").is_some());
    }

    #[test]
    fn test_request_body_omits_tools_when_disabled() {
        let config = AssistantConfig {
            search_augmentation: false,
            ..AssistantConfig::default()
        };
        let assistant = GenerativeAssistant::new(config);
        let request =
            assistant.build_request("hello", Language::English, &FarmerProfile::default());

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("tools").is_none());
    }

    #[test]
    fn test_request_url_includes_model_and_key() {
        let assistant = GenerativeAssistant::new(AssistantConfig::default());
        let url = assistant.request_url("secret");
        assert!(url.contains("gemini-1.5-flash:generateContent"));
        assert!(url.ends_with("key=secret"));
    }

    #[tokio::test]
    async fn test_ask_without_api_key_fails_locally() {
        let assistant = GenerativeAssistant::new(AssistantConfig::default());
        if std::env::var("KRISHI_ASSISTANT_API_KEY").is_err() {
            let result = assistant
                .ask("hello", Language::English, &FarmerProfile::default())
                .await;
            assert!(matches!(result, Err(KrishiError::Assistant(_))));
        }
    }
}
