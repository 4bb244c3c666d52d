#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;
    use uuid::Uuid;

    use netguardian::analyst::gateway::{
        AnalystGateway, ANALYSIS_EMPTY, ANALYSIS_FAILURE, ANALYSIS_OFFLINE, CHAT_EMPTY,
        CHAT_FAILURE, CHAT_OFFLINE, RULE_EMPTY, RULE_FAILURE, RULE_OFFLINE,
    };
    use netguardian::analyst::{GenerateError, GenerateRequest, TextGenerator};
    use netguardian::store::{Role, SessionStore};
    use netguardian::threat::models::{Disposition, Severity, ThreatEvent};

    enum Script {
        Reply(&'static str),
        Empty,
        Fail,
    }

    struct FakeGenerator {
        script: Script,
        seen: Mutex<Vec<GenerateRequest>>,
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        fn name(&self) -> &str {
            "fake"
        }

        async fn generate(
            &self,
            request: GenerateRequest,
        ) -> Result<Option<String>, GenerateError> {
            self.seen.lock().unwrap().push(request);
            match self.script {
                Script::Reply(text) => Ok(Some(text.to_string())),
                Script::Empty => Ok(None),
                Script::Fail => Err(GenerateError::Network("connection refused".to_string())),
            }
        }
    }

    fn gateway_with(script: Script) -> (AnalystGateway, Arc<FakeGenerator>) {
        let generator = Arc::new(FakeGenerator {
            script,
            seen: Mutex::new(Vec::new()),
        });
        let gateway = AnalystGateway::new(
            Some(generator.clone()),
            "chat-model".to_string(),
            "analysis-model".to_string(),
        );
        (gateway, generator)
    }

    fn offline_gateway() -> AnalystGateway {
        AnalystGateway::new(None, "chat-model".to_string(), "analysis-model".to_string())
    }

    fn sample_event() -> ThreatEvent {
        ThreatEvent {
            id: Uuid::new_v4(),
            source_addr: "45.22.19.11".to_string(),
            location: "Russia".to_string(),
            category: "Port Scan (SYN Flood)".to_string(),
            severity: Severity::High,
            confidence: 0.89,
            observed_at: Utc::now(),
            disposition: Disposition::Analyzing,
        }
    }

    #[tokio::test]
    async fn test_offline_mode_returns_fixed_strings() {
        let gateway = offline_gateway();
        assert!(!gateway.is_online());

        assert_eq!(gateway.chat("hello", &[]).await, CHAT_OFFLINE);
        assert_eq!(gateway.analyze_threat(&sample_event()).await, ANALYSIS_OFFLINE);
        assert_eq!(gateway.generate_waf_rule("OR 1=1").await, RULE_OFFLINE);
    }

    #[tokio::test]
    async fn test_offline_reply_still_appends_to_transcript() {
        let gateway = offline_gateway();
        let mut store = SessionStore::new();

        let history = store.transcript().to_vec();
        store.push_user("ping");
        let reply = gateway.chat("ping", &history).await;
        store.push_assistant(reply);

        let transcript = store.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[2].role, Role::Assistant);
        assert_eq!(transcript[2].content, CHAT_OFFLINE);
    }

    #[tokio::test]
    async fn test_failures_swallowed_into_sentinels() {
        let (gateway, _) = gateway_with(Script::Fail);

        assert_eq!(gateway.chat("hello", &[]).await, CHAT_FAILURE);
        assert_eq!(gateway.analyze_threat(&sample_event()).await, ANALYSIS_FAILURE);
        assert_eq!(gateway.generate_waf_rule("OR 1=1").await, RULE_FAILURE);
    }

    #[tokio::test]
    async fn test_empty_results_substituted_per_call_site() {
        let (gateway, _) = gateway_with(Script::Empty);

        assert_eq!(gateway.chat("hello", &[]).await, CHAT_EMPTY);
        assert_eq!(gateway.analyze_threat(&sample_event()).await, ANALYSIS_EMPTY);
        assert_eq!(gateway.generate_waf_rule("OR 1=1").await, RULE_EMPTY);
    }

    #[tokio::test]
    async fn test_history_mapping_relabels_and_preserves_order() {
        let mut store = SessionStore::bare();
        store.push_user("one");
        store.push_assistant("two");
        store.push_user("three");
        store.push_assistant("four");

        let (gateway, generator) = gateway_with(Script::Reply("ok"));
        let reply = gateway.chat("five", store.transcript()).await;
        assert_eq!(reply, "ok");

        let seen = generator.seen.lock().unwrap();
        let request = &seen[0];
        assert_eq!(request.message, "five");
        assert_eq!(request.history.len(), 4);

        let roles: Vec<&str> = request.history.iter().map(|t| t.role.as_str()).collect();
        assert_eq!(roles, vec!["user", "model", "user", "model"]);
        assert_eq!(request.history[0].content, "one");
        assert_eq!(request.history[3].content, "four");
    }

    #[tokio::test]
    async fn test_cve_lookup_scenario() {
        let (gateway, generator) =
            gateway_with(Script::Reply("Log4Shell: critical RCE in Log4j 2.x. Patch to 2.17.1."));
        let mut store = SessionStore::new();

        let question = "What is CVE-2021-44228?";
        let history = store.transcript().to_vec();
        store.push_user(question);
        let reply = gateway.chat(question, &history).await;
        store.push_assistant(reply);

        let transcript = store.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[0].role, Role::Assistant);
        assert_eq!(transcript[1].role, Role::User);
        assert_eq!(transcript[1].content, question);
        assert!(transcript[2].content.starts_with("Log4Shell"));

        // The greeting reached the wire as one "model" turn and the new
        // question travelled separately from the history.
        let seen = generator.seen.lock().unwrap();
        assert_eq!(seen[0].history.len(), 1);
        assert_eq!(seen[0].history[0].role, "model");
        assert_eq!(seen[0].message, question);
    }

    #[tokio::test]
    async fn test_personas_and_models_per_call_site() {
        let (gateway, generator) = gateway_with(Script::Reply("ok"));

        gateway.chat("q", &[]).await;
        gateway.analyze_threat(&sample_event()).await;
        gateway.generate_waf_rule("OR 1=1").await;

        let seen = generator.seen.lock().unwrap();
        assert_eq!(seen.len(), 3);

        let chat_system = seen[0].system_instruction.as_deref().unwrap();
        assert!(chat_system.contains("NetGuardian AI Security Analyst"));
        assert_eq!(seen[0].model, "chat-model");

        let triage_system = seen[1].system_instruction.as_deref().unwrap();
        assert!(triage_system.contains("senior security engineer"));
        assert_eq!(seen[1].model, "analysis-model");
        // Ad-hoc requests carry no prior history
        assert!(seen[1].history.is_empty());
        assert!(seen[1].message.contains("suggest mitigation"));
        assert!(seen[1].message.contains("45.22.19.11"));

        assert!(seen[2].system_instruction.is_none());
        assert!(seen[2].message.contains("OR 1=1"));
        assert!(seen[2].message.contains("Return ONLY the rule logic"));
    }
}
