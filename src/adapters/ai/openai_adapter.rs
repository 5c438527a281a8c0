//! OpenAI-compatible adapter for structured decisions.
//!
//! Works with the OpenAI API, Azure OpenAI and local Ollama instances.
//! Implements `DecisionPort` with JSON response format and markdown stripping.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::DomainError;
use crate::ports::DecisionPort;

/// Conversation memory budget, in estimated tokens.
const MAX_MEMORY_TOKENS: usize = 1500;

/// OpenAI-compatible decision agent.
///
/// Keeps the recent prompt/answer exchanges as conversation memory so the
/// model sees its own earlier choices. Oldest messages are dropped once the
/// memory exceeds its token budget.
pub struct OpenAiDecider {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
    system_prompt: String,
    memory: Mutex<Vec<ChatMessage>>,
}

impl OpenAiDecider {
    /// # Arguments
    /// * `api_url` - chat completions endpoint (e.g., "https://api.openai.com/v1/chat/completions")
    /// * `api_key` - API key (can be empty for local Ollama)
    /// * `model` - model name (e.g., "gpt-4o-mini")
    /// * `system_prompt` - role and persona of the agent
    pub fn new(api_url: String, api_key: String, model: String, system_prompt: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            model,
            system_prompt,
            memory: Mutex::new(Vec::new()),
        }
    }

    pub async fn clear_memory(&self) {
        self.memory.lock().await.clear();
    }

    fn structured_prompt(prompt: &str, schema: &Value) -> String {
        format!(
            "Your task:\n\
             1. Analyze the following input\n\
             2. Respond with a JSON document matching this JSON schema: {schema}\n\
             3. Ensure all required fields are included\n\n\
             Input: {prompt}\n\n\
             For each video, use the exact video id provided in the input. \
             Do NOT invent or shorten video ids and only include ids that were listed."
        )
    }

    /// Strip markdown code fences or surrounding prose from a model answer.
    fn sanitize_json(raw_text: &str) -> String {
        let trimmed = raw_text.trim();

        if trimmed.starts_with("```") {
            let without_prefix = if trimmed.starts_with("```json") {
                trimmed.strip_prefix("```json").unwrap_or(trimmed)
            } else {
                trimmed.strip_prefix("```").unwrap_or(trimmed)
            };

            if let Some(end_idx) = without_prefix.rfind("```") {
                return without_prefix[..end_idx].trim().to_string();
            }
            return without_prefix.trim().to_string();
        }

        if let Some(start) = trimmed.find('{') {
            if let Some(end) = trimmed.rfind('}') {
                if start < end {
                    return trimmed[start..=end].to_string();
                }
            }
        }

        trimmed.to_string()
    }
}

/// Roughly one token per four characters.
fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4
}

/// Drop the oldest messages until the memory fits `budget`.
fn trim_memory(memory: &mut Vec<ChatMessage>, budget: usize) {
    let mut total: usize = memory.iter().map(|m| estimate_tokens(&m.content)).sum();
    let mut drop = 0;
    while total > budget && drop < memory.len() {
        total -= estimate_tokens(&memory[drop].content);
        drop += 1;
    }
    if drop > 0 {
        debug!(dropped = drop, "trimmed decision memory");
        memory.drain(..drop);
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

impl ChatMessage {
    fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: String,
}

#[async_trait::async_trait]
impl DecisionPort for OpenAiDecider {
    async fn decide(&self, prompt: &str, schema: &Value) -> Result<Value, DomainError> {
        let user_prompt = Self::structured_prompt(prompt, schema);
        info!(
            model = %self.model,
            prompt_len = user_prompt.len(),
            "requesting decision"
        );

        // Held across the call: decisions are sequential and memory stays ordered.
        let mut memory = self.memory.lock().await;
        trim_memory(&mut memory, MAX_MEMORY_TOKENS);

        let mut messages = Vec::with_capacity(memory.len() + 2);
        messages.push(ChatMessage::new("system", self.system_prompt.clone()));
        messages.extend(memory.iter().cloned());
        messages.push(ChatMessage::new("user", user_prompt.clone()));

        let request = ChatRequest {
            model: self.model.clone(),
            messages,
            temperature: 0.7,
            max_tokens: 1000,
            response_format: Some(ResponseFormat {
                format_type: "json_object".to_string(),
            }),
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::Decision(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, "decision API returned error");
            return Err(DomainError::Decision(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Decision(format!("Failed to parse API response: {}", e)))?;

        let raw_content = chat_response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| DomainError::Decision("No response choices returned".to_string()))?;

        let clean_json = Self::sanitize_json(&raw_content);
        let decision: Value = serde_json::from_str(&clean_json).map_err(|e| {
            warn!(
                error = %e,
                json = %clean_json.chars().take(200).collect::<String>(),
                "JSON parse failed"
            );
            DomainError::Decision(format!("Failed to parse LLM JSON: {}", e))
        })?;

        memory.push(ChatMessage::new("user", user_prompt));
        memory.push(ChatMessage::new("assistant", clean_json));
        debug!(memory_messages = memory.len(), "decision received");

        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_json_clean() {
        let input = r#"{"action": "continue"}"#;
        assert_eq!(OpenAiDecider::sanitize_json(input), input);
    }

    #[test]
    fn test_sanitize_json_markdown() {
        let input = r#"```json
{"action": "quit"}
```"#;
        assert_eq!(OpenAiDecider::sanitize_json(input), r#"{"action": "quit"}"#);
    }

    #[test]
    fn test_sanitize_json_markdown_no_lang() {
        let input = r#"```
{"action": "quit"}
```"#;
        assert_eq!(OpenAiDecider::sanitize_json(input), r#"{"action": "quit"}"#);
    }

    #[test]
    fn test_sanitize_json_with_text() {
        let input = r#"Here is my decision:
{"actions": {"1": {"action": "noop", "reason": "boring"}}}"#;
        assert_eq!(
            OpenAiDecider::sanitize_json(input),
            r#"{"actions": {"1": {"action": "noop", "reason": "boring"}}}"#
        );
    }

    #[test]
    fn test_trim_memory_drops_oldest_first() {
        let mut memory = vec![
            ChatMessage::new("user", "a".repeat(40)),
            ChatMessage::new("assistant", "b".repeat(40)),
            ChatMessage::new("user", "c".repeat(40)),
        ];
        // 10 tokens each; a budget of 20 keeps the last two.
        trim_memory(&mut memory, 20);
        assert_eq!(memory.len(), 2);
        assert!(memory[0].content.starts_with('b'));

        trim_memory(&mut memory, 100);
        assert_eq!(memory.len(), 2);

        trim_memory(&mut memory, 0);
        assert!(memory.is_empty());
    }

    #[test]
    fn test_structured_prompt_embeds_schema() {
        let prompt = OpenAiDecider::structured_prompt(
            "video list",
            &crate::domain::EndOfCycleDecision::schema(),
        );
        assert!(prompt.contains("Input: video list"));
        assert!(prompt.contains("\"continue\""));
    }
}
