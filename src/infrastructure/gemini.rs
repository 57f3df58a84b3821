//! [`PromptInvoker`] backed by the Google Generative Language API.
//!
//! Each call is a single blocking `generateContent` request that asks for
//! JSON output matching [`TranslateOutput`].

use crate::domain::{
    render_prompt, PromptInvoker, TranslateError, TranslateInput, TranslateOutput, TranslateResult,
};
use crate::infrastructure::config::ModelConfig;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: serde_json::Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Builds the request body for one translation.
pub fn build_request(input: &TranslateInput) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(render_prompt(input)),
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: json!({
                "type": "OBJECT",
                "properties": {
                    "gurmukhiPunjabiText": {
                        "type": "STRING",
                        "description": "The translated Gurmukhi Punjabi text."
                    }
                },
                "required": ["gurmukhiPunjabiText"]
            }),
        },
    }
}

/// Extracts the structured output from the first candidate.
pub fn parse_response(response: GenerateContentResponse) -> TranslateResult<TranslateOutput> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| TranslateError::failure("model returned no candidates"))?;

    let finish_reason = candidate.finish_reason;
    let text = candidate
        .content
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or_else(|| match &finish_reason {
            Some(reason) => TranslateError::failure(format!("model returned no text ({})", reason)),
            None => TranslateError::failure("model returned no text"),
        })?;

    serde_json::from_str::<TranslateOutput>(&text)
        .map_err(|e| TranslateError::failure(format!("malformed model output: {}", e)))
}

pub struct GeminiInvoker {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl GeminiInvoker {
    pub fn new(config: &ModelConfig) -> TranslateResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(TranslateError::failure)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.resolve_api_key(),
            api_key_env: config.api_key_env.clone(),
        })
    }

    pub fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

impl PromptInvoker for GeminiInvoker {
    fn display_name(&self) -> &str {
        &self.model
    }

    fn invoke(&self, input: &TranslateInput) -> TranslateResult<TranslateOutput> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(TranslateError::failure(format!(
                "no API key configured (set {} or model.api_key)",
                self.api_key_env
            )));
        };

        tracing::debug!(model = %self.model, chars = input.roman_punjabi_text.chars().count(), "Calling generateContent");

        let response = self
            .client
            .post(self.url())
            .query(&[("key", api_key)])
            .json(&build_request(input))
            .send()
            .map_err(TranslateError::failure)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(TranslateError::failure(format!(
                "model endpoint returned {}: {}",
                status,
                body.trim()
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .map_err(|e| TranslateError::failure(format!("unreadable model response: {}", e)))?;
        parse_response(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_from(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_request_body_shape() {
        let input = TranslateInput {
            roman_punjabi_text: "Ho jadd vi bole".to_string(),
        };
        let body = serde_json::to_value(build_request(&input)).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(
            body["contents"][0]["parts"][0]["text"],
            "Translate the following Romanized Punjabi into formal Gurmukhi Punjabi:\n\nHo jadd vi bole"
        );
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(
            body["generationConfig"]["responseSchema"]["required"][0],
            "gurmukhiPunjabiText"
        );
    }

    #[test]
    fn test_parse_structured_output() {
        let response = response_from(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "{\"gurmukhiPunjabiText\": \"ਹੋ ਜਦ ਵੀ ਬੋਲੇ\"}" }]
                },
                "finishReason": "STOP"
            }]
        }));

        let output = parse_response(response).unwrap();
        assert_eq!(output.gurmukhi_punjabi_text, "ਹੋ ਜਦ ਵੀ ਬੋਲੇ");
    }

    #[test]
    fn test_parse_no_candidates() {
        let err = parse_response(response_from(json!({ "candidates": [] }))).unwrap_err();
        assert_eq!(
            err,
            TranslateError::TranslationFailure("model returned no candidates".to_string())
        );
    }

    #[test]
    fn test_parse_blocked_candidate() {
        let response = response_from(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }));

        let err = parse_response(response).unwrap_err();
        assert_eq!(err.to_string(), "model returned no text (SAFETY)");
    }

    #[test]
    fn test_parse_malformed_output() {
        let response = response_from(json!({
            "candidates": [{ "content": { "parts": [{ "text": "ਹੋ ਜਦ" }] } }]
        }));

        let err = parse_response(response).unwrap_err();
        assert!(err.to_string().starts_with("malformed model output"));
    }

    #[test]
    fn test_missing_api_key_fails_without_request() {
        let config = ModelConfig {
            api_key: None,
            api_key_env: "LIPIANTAR_TEST_UNSET_KEY_VAR".to_string(),
            endpoint: "http://127.0.0.1:9/v1beta/".to_string(),
            ..ModelConfig::default()
        };
        let invoker = GeminiInvoker::new(&config).unwrap();
        assert_eq!(
            invoker.url(),
            "http://127.0.0.1:9/v1beta/models/gemini-2.0-flash:generateContent"
        );

        let err = invoker
            .invoke(&TranslateInput {
                roman_punjabi_text: "kiddan".to_string(),
            })
            .unwrap_err();
        assert!(err.to_string().contains("LIPIANTAR_TEST_UNSET_KEY_VAR"));
    }
}
