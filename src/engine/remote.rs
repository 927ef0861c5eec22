//! Remote Content Adapter
//!
//! Best-effort client for an OpenAI-compatible chat-completions endpoint.
//! Every call is a single attempt bounded by the configured timeout; any
//! transport error, non-2xx status, or response body that does not parse as
//! the expected structured object is a hard failure, and the caller falls
//! back to the deterministic path.

use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::engine::prompts;
use crate::error::{ServiceError, ServiceResult};
use crate::types::{Idea, IdeaContent, IterationDelta, ScaffoldPlan};

#[derive(Clone, Debug)]
pub struct RemoteConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

pub struct RemoteClient {
    config: RemoteConfig,
    agent: ureq::Agent,
}

impl RemoteClient {
    pub fn new(config: RemoteConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout).build();
        let config = RemoteConfig {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            ..config
        };
        Self { config, agent }
    }

    /// Request content for a brand-new idea.
    pub fn generate_content(&self) -> ServiceResult<IdeaContent> {
        self.request_structured(
            prompts::GENERATE_SYSTEM_PROMPT,
            prompts::GENERATE_IDEA_PROMPT,
            0.9,
        )
    }

    /// Request the next iteration delta for an existing idea.
    pub fn iterate_content(&self, idea: &Idea) -> ServiceResult<IterationDelta> {
        self.request_structured(
            prompts::ITERATE_SYSTEM_PROMPT,
            &prompts::build_iteration_prompt(idea),
            0.8,
        )
    }

    /// Request a described file set for an idea's scaffold.
    pub fn scaffold_plan(&self, idea: &Idea, updating_existing: bool) -> ServiceResult<ScaffoldPlan> {
        self.request_structured(
            prompts::SCAFFOLD_SYSTEM_PROMPT,
            &prompts::build_scaffold_prompt(idea, updating_existing),
            0.7,
        )
    }

    fn request_structured<T: DeserializeOwned>(
        &self,
        system: &str,
        user: &str,
        temperature: f64,
    ) -> ServiceResult<T> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let body = json!({
            "model": self.config.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
            "temperature": temperature,
            "response_format": {"type": "json_object"},
        });

        tracing::debug!(url = %url, model = %self.config.model, "remote content request");
        let response = self
            .agent
            .post(&url)
            .set("Authorization", &format!("Bearer {}", self.config.api_key))
            .send_json(body)
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => {
                    ServiceError::Api(format!("remote API returned status {code}"))
                }
                other => ServiceError::Network(format!("remote request failed: {other}")),
            })?;

        let text = response
            .into_string()
            .map_err(|e| ServiceError::Network(format!("failed to read response body: {e}")))?;
        parse_structured(&text)
    }
}

/// Extract the first choice's message content and parse it as `T`. Anything
/// short of the full expected shape is an error; there is no partial-credit
/// parsing.
fn parse_structured<T: DeserializeOwned>(body: &str) -> ServiceResult<T> {
    let envelope: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ServiceError::Api(format!("unexpected response shape: {e}")))?;
    let content = envelope
        .choices
        .first()
        .map(|c| c.message.content.as_str())
        .ok_or_else(|| ServiceError::Api("response contained no choices".to_string()))?;
    serde_json::from_str(content)
        .map_err(|e| ServiceError::Api(format!("response content is not the expected object: {e}")))
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(content: &str) -> String {
        serde_json::to_string(&json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        }))
        .unwrap()
    }

    #[test]
    fn parses_well_formed_idea_content() {
        let content = r#"{
            "title": "Drift Radar",
            "description": "Detects config drift.",
            "category": "Infrastructure & DevOps",
            "target_audience": "Platform teams",
            "key_features": ["Drift detection", "Alerts", "Rollbacks"],
            "monetization": "Usage-based pricing with free tier",
            "technical_approach": "Agentless scanning"
        }"#;
        let parsed: IdeaContent = parse_structured(&envelope(content)).unwrap();
        assert_eq!(parsed.title, "Drift Radar");
        assert_eq!(parsed.key_features.len(), 3);
    }

    #[test]
    fn rejects_unknown_category() {
        let content = r#"{
            "title": "X",
            "description": "Y",
            "category": "Quantum Widgets",
            "target_audience": "Z",
            "key_features": [],
            "monetization": "None",
            "technical_approach": "None"
        }"#;
        let parsed: ServiceResult<IdeaContent> = parse_structured(&envelope(content));
        assert!(matches!(parsed, Err(ServiceError::Api(_))));
    }

    #[test]
    fn rejects_empty_choices_and_garbage_bodies() {
        let empty: ServiceResult<IdeaContent> = parse_structured(r#"{"choices": []}"#);
        assert!(matches!(empty, Err(ServiceError::Api(_))));

        let garbage: ServiceResult<IdeaContent> = parse_structured("<html>502</html>");
        assert!(matches!(garbage, Err(ServiceError::Api(_))));

        let partial: ServiceResult<IterationDelta> = parse_structured(&envelope(r#"{"iteration_type": "Feature Expansion"}"#));
        assert!(matches!(partial, Err(ServiceError::Api(_))));
    }

    #[test]
    fn base_url_is_normalized() {
        let client = RemoteClient::new(RemoteConfig {
            api_key: "key".into(),
            model: "gpt-4o-mini".into(),
            base_url: "https://api.openai.com/v1/".into(),
            timeout: Duration::from_secs(30),
        });
        assert_eq!(client.config.base_url, "https://api.openai.com/v1");
    }
}
