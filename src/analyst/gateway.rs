use std::sync::Arc;

use tracing::error;

use crate::analyst::{GenerateRequest, GeneratorFactory, TextGenerator, Turn};
use crate::config::AppConfig;
use crate::store::models::{ChatMessage, Role};
use crate::threat::models::ThreatEvent;

pub const ANALYST_PERSONA: &str = "You are the NetGuardian AI Security Analyst.
Your role is to analyze network threats, explain technical security concepts, generate WAF rules, and provide actionable mitigation strategies.
You are integrated into an enterprise dashboard. Be concise, professional, and use security terminology (CVE, OWASP, etc.).
If asked to generate a report, format it with clear headers and bullet points.
Current Context: Monitoring 14 active nodes. Threat level is ELEVATED.";

const TRIAGE_PERSONA: &str =
    "You are a senior security engineer. Analyze the JSON threat data provided. Be brief and decisive.";

// Fixed user-facing strings. Offline, empty and failed outcomes all render as
// ordinary assistant text; callers never branch on them.
pub const CHAT_OFFLINE: &str = "Gemini API key missing. Running in offline mode.";
pub const CHAT_EMPTY: &str = "No response received.";
pub const CHAT_FAILURE: &str = "I'm having trouble connecting to the security mainframe (API Error).";

pub const ANALYSIS_OFFLINE: &str = "Gemini API key not configured. Unable to analyze.";
pub const ANALYSIS_EMPTY: &str = "No analysis generated.";
pub const ANALYSIS_FAILURE: &str = "Error during analysis. Please check system logs.";

pub const RULE_OFFLINE: &str = "API key missing.";
pub const RULE_EMPTY: &str = "Could not generate rule.";
pub const RULE_FAILURE: &str = "Error generating rule.";

/// Stateless mediator between the UI and the text-generation backend. Every
/// operation resolves to a displayable string; no failure escapes as an error.
///
/// Callers must not overlap two `chat` calls against the same session store.
/// The HTTP layer enforces that with a single-slot in-flight guard; the CLI
/// REPL is serial by construction. The ad-hoc operations touch no shared
/// state and may run concurrently with a chat exchange.
pub struct AnalystGateway {
    generator: Option<Arc<dyn TextGenerator>>,
    chat_model: String,
    analysis_model: String,
}

impl AnalystGateway {
    pub fn new(
        generator: Option<Arc<dyn TextGenerator>>,
        chat_model: String,
        analysis_model: String,
    ) -> Self {
        Self {
            generator,
            chat_model,
            analysis_model,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            GeneratorFactory::create_default(config),
            config.gemini.chat_model.clone(),
            config.gemini.analysis_model.clone(),
        )
    }

    pub fn is_online(&self) -> bool {
        self.generator.is_some()
    }

    /// One conversational exchange. `history` is the transcript as it stood
    /// before the new utterance; the utterance itself travels separately.
    pub async fn chat(&self, message: &str, history: &[ChatMessage]) -> String {
        let Some(generator) = &self.generator else {
            return CHAT_OFFLINE.to_string();
        };

        let request = GenerateRequest {
            model: self.chat_model.clone(),
            system_instruction: Some(ANALYST_PERSONA.to_string()),
            history: map_history(history),
            message: message.to_string(),
        };

        match generator.generate(request).await {
            Ok(Some(text)) => text,
            Ok(None) => CHAT_EMPTY.to_string(),
            Err(e) => {
                error!("Chat request failed: {}", e);
                CHAT_FAILURE.to_string()
            }
        }
    }

    /// One-shot assessment of a single threat event, no session semantics.
    pub async fn analyze_threat(&self, event: &ThreatEvent) -> String {
        let Some(generator) = &self.generator else {
            return ANALYSIS_OFFLINE.to_string();
        };

        let payload = serde_json::to_string_pretty(event).unwrap_or_default();
        let request = GenerateRequest {
            model: self.analysis_model.clone(),
            system_instruction: Some(TRIAGE_PERSONA.to_string()),
            history: Vec::new(),
            message: format!(
                "Analyze this network threat payload and suggest mitigation:\n{}",
                payload
            ),
        };

        match generator.generate(request).await {
            Ok(Some(text)) => text,
            Ok(None) => ANALYSIS_EMPTY.to_string(),
            Err(e) => {
                error!("Threat analysis failed: {}", e);
                ANALYSIS_FAILURE.to_string()
            }
        }
    }

    /// Same single-request contract as `analyze_threat`, for WAF rule text.
    pub async fn generate_waf_rule(&self, attack_pattern: &str) -> String {
        let Some(generator) = &self.generator else {
            return RULE_OFFLINE.to_string();
        };

        let request = GenerateRequest {
            model: self.analysis_model.clone(),
            system_instruction: None,
            history: Vec::new(),
            message: format!(
                "Generate a ModSecurity or regex rule to block this pattern: {}. Return ONLY the rule logic.",
                attack_pattern
            ),
        };

        match generator.generate(request).await {
            Ok(Some(text)) => text,
            Ok(None) => RULE_EMPTY.to_string(),
            Err(e) => {
                error!("Rule generation failed: {}", e);
                RULE_FAILURE.to_string()
            }
        }
    }
}

/// Assistant turns become "model" on the wire; every other role is sent as
/// "user". Order and length are preserved.
pub fn map_history(history: &[ChatMessage]) -> Vec<Turn> {
    history
        .iter()
        .map(|m| Turn {
            role: match m.role {
                Role::Assistant => "model".to_string(),
                _ => "user".to_string(),
            },
            content: m.content.clone(),
        })
        .collect()
}
