use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::ChatMessage;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRuleRequest {
    pub pattern: String,
}

#[derive(Debug, Serialize)]
pub struct ChatExchange {
    pub user: ChatMessage,
    pub assistant: ChatMessage,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub id: Uuid,
    pub assessment: String,
}

#[derive(Debug, Serialize)]
pub struct GeneratedRuleResponse {
    pub pattern: String,
    pub rule: String,
}
