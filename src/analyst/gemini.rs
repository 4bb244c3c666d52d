use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::analyst::{GenerateError, GenerateRequest, TextGenerator};

pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: GenerateRequest) -> Result<Option<String>, GenerateError> {
        // Gemini takes the whole conversation in 'contents'; the new message
        // goes last as a user turn. The system instruction is a separate field.
        let mut contents: Vec<serde_json::Value> = request
            .history
            .iter()
            .map(|t| json!({ "role": t.role, "parts": [{ "text": t.content }] }))
            .collect();
        contents.push(json!({ "role": "user", "parts": [{ "text": request.message }] }));

        let mut body = json!({ "contents": contents });
        if let Some(system) = &request.system_instruction {
            body["systemInstruction"] = json!({ "parts": [{ "text": system }] });
        }

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, request.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerateError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Err(GenerateError::RateLimited);
            }
            return Err(GenerateError::Api(format!("Gemini Error {}: {}", status, text)));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GenerateError::Network(e.to_string()))?;

        // A well-formed response with no candidate text is not an error here;
        // the gateway substitutes its own fallback string.
        let text = json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|s| s.to_string())
            .filter(|s| !s.is_empty());

        Ok(text)
    }
}
