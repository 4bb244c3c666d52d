use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ranked severity, LOW < MEDIUM < HIGH < CRITICAL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Disposition {
    Blocked,
    Monitoring,
    Analyzing,
}

/// One detected network anomaly. Produced by the feed, read-only everywhere
/// else; the analyst consumes it by value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatEvent {
    pub id: Uuid,
    pub source_addr: String,
    pub location: String,
    pub category: String,
    pub severity: Severity,
    /// ML confidence in 0.0..=1.0.
    pub confidence: f64,
    pub observed_at: DateTime<Utc>,
    pub disposition: Disposition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RuleAction {
    Block,
    Allow,
    Log,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WafRule {
    pub id: u32,
    pub name: String,
    pub pattern: String,
    pub action: RuleAction,
    pub active: bool,
    pub ai_generated: bool,
    pub hits: u64,
}
