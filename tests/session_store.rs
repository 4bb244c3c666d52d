#[cfg(test)]
mod tests {
    use netguardian::store::{Role, SessionStore};

    #[test]
    fn test_transcript_preserves_call_order() {
        let mut store = SessionStore::bare();
        store.push_user("first");
        store.push_assistant("second");
        store.push_user("third");

        let transcript = store.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[0].content, "first");
        assert_eq!(transcript[0].role, Role::User);
        assert_eq!(transcript[1].content, "second");
        assert_eq!(transcript[1].role, Role::Assistant);
        assert_eq!(transcript[2].content, "third");
    }

    #[test]
    fn test_ids_unique_and_increasing_timestamps_monotonic() {
        let mut store = SessionStore::bare();
        for i in 0..20 {
            if i % 2 == 0 {
                store.push_user(format!("u{}", i));
            } else {
                store.push_assistant(format!("a{}", i));
            }
        }

        let transcript = store.transcript();
        for pair in transcript.windows(2) {
            assert!(pair[0].id < pair[1].id);
            assert!(pair[0].created_at <= pair[1].created_at);
        }
    }

    #[test]
    fn test_new_store_seeds_analyst_greeting() {
        let store = SessionStore::new();
        let transcript = store.transcript();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].role, Role::Assistant);
        assert!(transcript[0].content.contains("NetGuardian AI Analyst online"));
    }

    #[test]
    fn test_reset_destroys_transcript_and_reseeds() {
        let mut store = SessionStore::new();
        store.push_user("hello");
        store.push_assistant("hi");
        let last_id = store.transcript().last().unwrap().id;

        store.reset();

        let transcript = store.transcript();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].role, Role::Assistant);
        // Ids never repeat within one store
        assert!(transcript[0].id > last_id);
    }
}
