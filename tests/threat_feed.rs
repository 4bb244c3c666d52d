#[cfg(test)]
mod tests {
    use netguardian::threat::feed::{synthesize, ThreatBoard, BOARD_CAPACITY};
    use netguardian::threat::models::{Disposition, Severity};

    #[test]
    fn test_board_starts_seeded() {
        let board = ThreatBoard::new();
        assert_eq!(board.events().len(), 4);
        assert_eq!(board.rules().len(), 3);
        assert_eq!(board.events()[0].severity, Severity::Critical);
    }

    #[test]
    fn test_board_keeps_newest_first_up_to_capacity() {
        let mut board = ThreatBoard::new();

        let event = synthesize();
        let id = event.id;
        board.record(event);
        assert_eq!(board.events()[0].id, id);
        assert!(board.find_event(id).is_some());

        for _ in 0..2 * BOARD_CAPACITY {
            board.record(synthesize());
        }
        assert_eq!(board.events().len(), BOARD_CAPACITY);
        // The early event has rolled off by now
        assert!(board.find_event(id).is_none());
    }

    #[test]
    fn test_severity_ranking() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn test_synthesized_events_stay_in_range() {
        for _ in 0..50 {
            let event = synthesize();
            assert!((0.0..=1.0).contains(&event.confidence));
            assert_eq!(event.disposition, Disposition::Analyzing);
            assert!(event.severity < Severity::Critical);
        }
    }

    #[test]
    fn test_wire_format_uses_uppercase_tags() {
        let json = serde_json::to_value(synthesize()).unwrap();
        let severity = json["severity"].as_str().unwrap();
        assert!(["LOW", "MEDIUM", "HIGH"].contains(&severity));
        assert_eq!(json["disposition"], "ANALYZING");
    }
}
