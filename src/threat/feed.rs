use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use tracing::info;
use uuid::Uuid;

use crate::config::FeedConfig;
use crate::threat::models::{Disposition, RuleAction, Severity, ThreatEvent, WafRule};

pub type BoardHandle = Arc<Mutex<ThreatBoard>>;

/// The dashboard's rolling table keeps this many events.
pub const BOARD_CAPACITY: usize = 10;

/// Rolling board of recent threat events plus the WAF rule list. Newest
/// events first, matching the live table.
pub struct ThreatBoard {
    events: Vec<ThreatEvent>,
    rules: Vec<WafRule>,
}

impl ThreatBoard {
    pub fn new() -> Self {
        Self {
            events: seed_events(),
            rules: seed_rules(),
        }
    }

    pub fn events(&self) -> &[ThreatEvent] {
        &self.events
    }

    pub fn find_event(&self, id: Uuid) -> Option<&ThreatEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn record(&mut self, event: ThreatEvent) {
        self.events.insert(0, event);
        self.events.truncate(BOARD_CAPACITY);
    }

    pub fn rules(&self) -> &[WafRule] {
        &self.rules
    }
}

impl Default for ThreatBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// One pseudo-random event in the shape the dashboard simulator emits.
pub fn synthesize() -> ThreatEvent {
    const SOURCES: &[&str] = &["192.168.1.1", "10.0.0.5", "172.16.0.22", "8.8.8.8"];
    const CATEGORIES: &[&str] = &[
        "DDoS Attempt",
        "Malware Beacon",
        "Unauthorized Access",
        "Brute Force",
    ];
    const SEVERITIES: &[Severity] = &[Severity::Low, Severity::Medium, Severity::High];

    let mut rng = rand::thread_rng();
    ThreatEvent {
        id: Uuid::new_v4(),
        source_addr: SOURCES[rng.gen_range(0..SOURCES.len())].to_string(),
        location: "Unknown".to_string(),
        category: CATEGORIES[rng.gen_range(0..CATEGORIES.len())].to_string(),
        severity: SEVERITIES[rng.gen_range(0..SEVERITIES.len())],
        confidence: rng.gen_range(0.0..1.0),
        observed_at: Utc::now(),
        disposition: Disposition::Analyzing,
    }
}

/// Background task feeding the live table on the configured cadence.
pub fn spawn_simulator(board: BoardHandle, config: FeedConfig) {
    let probability = config.emit_probability.clamp(0.0, 1.0);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(config.interval_secs.max(1)));
        loop {
            interval.tick().await;
            if rand::thread_rng().gen_bool(probability) {
                let event = synthesize();
                info!(
                    "Simulated threat: {} from {}",
                    event.category, event.source_addr
                );
                board.lock().unwrap().record(event);
            }
        }
    });
}

fn seed_events() -> Vec<ThreatEvent> {
    let now = Utc::now();
    vec![
        ThreatEvent {
            id: Uuid::new_v4(),
            source_addr: "192.168.1.105".to_string(),
            location: "Unknown Proxy".to_string(),
            category: "SQL Injection Attempt".to_string(),
            severity: Severity::Critical,
            confidence: 0.98,
            observed_at: now,
            disposition: Disposition::Blocked,
        },
        ThreatEvent {
            id: Uuid::new_v4(),
            source_addr: "45.22.19.11".to_string(),
            location: "Russia".to_string(),
            category: "Port Scan (SYN Flood)".to_string(),
            severity: Severity::High,
            confidence: 0.89,
            observed_at: now - chrono::Duration::minutes(5),
            disposition: Disposition::Analyzing,
        },
        ThreatEvent {
            id: Uuid::new_v4(),
            source_addr: "103.21.244.0".to_string(),
            location: "China".to_string(),
            category: "XSS Payload".to_string(),
            severity: Severity::Medium,
            confidence: 0.75,
            observed_at: now - chrono::Duration::minutes(12),
            disposition: Disposition::Blocked,
        },
        ThreatEvent {
            id: Uuid::new_v4(),
            source_addr: "185.100.85.1".to_string(),
            location: "Netherlands".to_string(),
            category: "Unusual User Agent".to_string(),
            severity: Severity::Low,
            confidence: 0.45,
            observed_at: now - chrono::Duration::minutes(30),
            disposition: Disposition::Monitoring,
        },
    ]
}

fn seed_rules() -> Vec<WafRule> {
    vec![
        WafRule {
            id: 101,
            name: "Block SQLi Patterns".to_string(),
            pattern: "DROP TABLE|UNION SELECT|OR 1=1".to_string(),
            action: RuleAction::Block,
            active: true,
            ai_generated: false,
            hits: 1420,
        },
        WafRule {
            id: 102,
            name: "XSS Prevention".to_string(),
            pattern: "<script>|javascript:|onerror=".to_string(),
            action: RuleAction::Block,
            active: true,
            ai_generated: false,
            hits: 856,
        },
        WafRule {
            id: 103,
            name: "AI Dynamic Rate Limit".to_string(),
            pattern: "REQ_PER_SEC > 50 AND PATH=\"/login\"".to_string(),
            action: RuleAction::Block,
            active: true,
            ai_generated: true,
            hits: 34,
        },
    ]
}
