//! Gemini generation provider: chat-style prompting over the Gemini REST
//! API, with input truncation and prompt assembly (§4.5, §12).

use async_trait::async_trait;
use ragcore_domain::error::{Error, Result};
use ragcore_domain::ports::{GenerationProvider, MessageRole, ProviderMessage};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

fn gemini_role(role: MessageRole) -> Option<&'static str> {
    match role {
        MessageRole::User => Some("user"),
        MessageRole::Assistant => Some("model"),
        // System turns are carried via the request's `systemInstruction` field.
        MessageRole::System => None,
    }
}

/// Calls the Gemini `generateContent` REST endpoint.
pub struct GeminiGenerationProvider {
    api_key: String,
    model: String,
    system_instructions: Option<String>,
    default_max_tokens: u32,
    default_temperature: f32,
    default_input_max_characters: usize,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiGenerationProvider {
    /// Build a provider for `model` (e.g. `"gemini-1.5-flash"`).
    pub fn new(
        api_key: String,
        model: String,
        system_instructions: Option<String>,
        default_max_tokens: u32,
        default_temperature: f32,
        default_input_max_characters: usize,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| Error::provider(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            api_key,
            model,
            system_instructions,
            default_max_tokens,
            default_temperature,
            default_input_max_characters,
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        })
    }

    fn api_model_name(&self) -> &str {
        self.model.strip_prefix("models/").unwrap_or(&self.model)
    }

    /// Truncate `text` to the configured character budget, a cheap proxy
    /// for token budgeting applied before prompting.
    #[must_use]
    pub fn truncate_input(&self, text: &str) -> String {
        text.chars()
            .take(self.default_input_max_characters)
            .collect::<String>()
            .trim()
            .to_string()
    }

    fn build_contents(&self, prompt: &str, chat_history: &[ProviderMessage]) -> Vec<serde_json::Value> {
        let mut contents: Vec<serde_json::Value> = chat_history
            .iter()
            .filter_map(|message| {
                gemini_role(message.role).map(|role| {
                    serde_json::json!({
                        "role": role,
                        "parts": [{ "text": message.text }],
                    })
                })
            })
            .collect();
        contents.push(serde_json::json!({
            "role": "user",
            "parts": [{ "text": self.truncate_input(prompt) }],
        }));
        contents
    }
}

#[async_trait]
impl GenerationProvider for GeminiGenerationProvider {
    async fn generate_text(
        &self,
        prompt: &str,
        chat_history: &[ProviderMessage],
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url,
            self.api_model_name(),
            self.api_key
        );

        let mut payload = serde_json::json!({
            "contents": self.build_contents(prompt, chat_history),
            "generationConfig": {
                "maxOutputTokens": max_tokens.unwrap_or(self.default_max_tokens),
                "temperature": temperature.unwrap_or(self.default_temperature),
            },
        });
        if let Some(instructions) = &self.system_instructions {
            payload["systemInstruction"] = serde_json::json!({
                "parts": [{ "text": instructions }],
            });
        }

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::provider(format!("Gemini generation request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::provider(format!("Gemini generation API error {status}: {body}")));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::provider(format!("failed to parse Gemini generation response: {e}")))?;

        let text = body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .unwrap_or_default()
            .to_string();
        Ok(text)
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> GeminiGenerationProvider {
        GeminiGenerationProvider::new(
            "key".to_string(),
            "models/gemini-1.5-flash".to_string(),
            Some("be concise".to_string()),
            1024,
            0.7,
            10,
        )
        .unwrap()
    }

    #[test]
    fn truncate_input_caps_at_character_budget() {
        let provider = provider();
        assert_eq!(provider.truncate_input("abcdefghijklmno"), "abcdefghij");
    }

    #[test]
    fn truncate_input_trims_whitespace_after_cut() {
        let provider = provider();
        assert_eq!(provider.truncate_input("abc       "), "abc");
    }

    #[test]
    fn gemini_role_drops_system_turns() {
        assert_eq!(gemini_role(MessageRole::System), None);
        assert_eq!(gemini_role(MessageRole::User), Some("user"));
        assert_eq!(gemini_role(MessageRole::Assistant), Some("model"));
    }

    #[test]
    fn build_contents_appends_prompt_after_history() {
        let provider = provider();
        let history = vec![ProviderMessage {
            role: MessageRole::User,
            text: "hi".to_string(),
        }];
        let contents = provider.build_contents("hello world", &history);
        assert_eq!(contents.len(), 2);
        assert_eq!(contents[1]["role"], "user");
    }
}
