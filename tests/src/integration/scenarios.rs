//! # Default Scenarios
//!
//! Each transport driven through its public driver with the default
//! configuration, checked against the properties a presentation layer
//! relies on:
//!
//! - sender-side events causally precede receiver-side consumption
//! - every started role emits exactly one `*_done`
//! - reports are bordered by the header and footer markers

#[cfg(test)]
mod tests {
    use secure_transport::{
        run_queue, secure_pipe_example, secure_queue_example, secure_shared_store_example,
        SharedSlot, TransportConfig,
    };
    use shared_bus::{EventFilter, EventKind, EventLog, Role, TransportEvent};
    use shared_crypto::{RandomKeyProvider, SecretKey};
    use std::time::Duration;

    // =========================================================================
    // HELPERS
    // =========================================================================

    fn index_of(events: &[TransportEvent], role: Role, kind: EventKind) -> Option<usize> {
        events.iter().position(|e| e.role == role && e.kind == kind)
    }

    fn count(events: &[TransportEvent], kind: EventKind) -> usize {
        events.iter().filter(|e| e.kind == kind).count()
    }

    // =========================================================================
    // PIPE
    // =========================================================================

    #[tokio::test]
    async fn test_pipe_end_to_end() {
        let (report, events) = secure_pipe_example(None).await.unwrap();

        let sequence = [
            (Role::Sender, EventKind::Encrypted),
            (Role::Sender, EventKind::Tagged),
            (Role::Receiver, EventKind::Received),
            (Role::Receiver, EventKind::AuthOk),
            (Role::Receiver, EventKind::Decrypted),
            (Role::Receiver, EventKind::ReceiverDone),
        ];
        let positions: Vec<usize> = sequence
            .iter()
            .map(|(role, kind)| index_of(&events, *role, *kind).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");

        assert!(index_of(&events, Role::Sender, EventKind::SenderDone).is_some());
        assert_eq!(events.len(), 7);

        let decrypted = &events[positions[4]];
        assert_eq!(
            decrypted.payload.as_deref(),
            Some("Hello Securely through Pipe")
        );

        assert!(report.contains("--- Secure Pipe Communication ---"));
        assert!(report.contains("--- Secure Pipe Done ---"));
        assert!(report.contains("receiver_decrypted: Hello Securely through Pipe"));
    }

    #[tokio::test]
    async fn test_pipe_one_shot() {
        let (_, events) = secure_pipe_example(None).await.unwrap();
        let outcomes = count(&events, EventKind::Decrypted)
            + count(&events, EventKind::DecryptError)
            + count(&events, EventKind::AuthFailed)
            + count(&events, EventKind::InvalidFormat)
            + count(&events, EventKind::ReceiveError);
        assert_eq!(outcomes, 1);
    }

    // =========================================================================
    // QUEUE
    // =========================================================================

    #[tokio::test]
    async fn test_queue_default_messages() {
        let (report, events) = secure_queue_example(None).await.unwrap();

        let delivered: Vec<&str> = EventFilter::kinds(vec![EventKind::Decrypted])
            .apply(&events)
            .into_iter()
            .filter_map(|e| e.payload.as_deref())
            .collect();
        assert_eq!(delivered, vec!["Secure Data 1", "Secure Data 2"]);
        assert!(report.starts_with("--- Secure Message Queue Communication ---"));
        assert!(report.ends_with("--- Secure Message Queue Done ---"));
    }

    #[tokio::test]
    async fn test_queue_ordering_abc() {
        let config = TransportConfig::default().with_queue_messages(["A", "B", "C"]);
        let (_, events) = run_queue(&config, &RandomKeyProvider).await.unwrap();

        let receiver: Vec<&TransportEvent> = EventFilter::roles(vec![Role::Receiver])
            .apply(&events)
            .into_iter()
            .collect();
        let delivered: Vec<&str> = receiver
            .iter()
            .filter(|e| e.kind == EventKind::Decrypted)
            .filter_map(|e| e.payload.as_deref())
            .collect();

        assert_eq!(delivered, vec!["A", "B", "C"]);
        assert_eq!(count(&events, EventKind::Enqueued), 3);
        assert_eq!(count(&events, EventKind::ReceiverDone), 1);
        // Sentinel produces nothing: three deliveries then done.
        assert_eq!(receiver.len(), 4);
        assert_eq!(receiver[3].kind, EventKind::ReceiverDone);
    }

    #[tokio::test]
    async fn test_queue_empty_list_still_finishes() {
        let config = TransportConfig::default().with_queue_messages(Vec::<String>::new());
        let (_, events) = run_queue(&config, &RandomKeyProvider).await.unwrap();

        let kinds: Vec<EventKind> = events.iter().map(|e| e.kind).collect();
        assert!(kinds.contains(&EventKind::SenderDone));
        assert!(kinds.contains(&EventKind::ReceiverDone));
        assert_eq!(kinds.len(), 2);
    }

    // =========================================================================
    // SHARED STORE
    // =========================================================================

    #[tokio::test]
    async fn test_shared_store_example() {
        let (report, events) = secure_shared_store_example(None).await.unwrap();

        let kinds: Vec<EventKind> = events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::Written,
                EventKind::WriterDone,
                EventKind::Read,
                EventKind::Decrypted,
                EventKind::ReaderDone,
            ]
        );
        assert!(report.contains("reader_decrypted: Shared Secure Data (sensitive)"));
        assert!(report.contains("writer_done"));
    }

    #[tokio::test]
    async fn test_shared_store_absence() {
        let slot = SharedSlot::new();
        let log = EventLog::new();

        secure_transport::adapters::shared_store::run_reader(
            &slot,
            secure_transport::RoleContext::new(
                &SecretKey::generate(),
                log.sink().for_role(Role::Reader),
                Duration::from_millis(100),
            ),
        )
        .await;

        let events = log.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, EventKind::NoData);
        assert_eq!(events[0].payload, None);
        assert_eq!(events[1].kind, EventKind::ReaderDone);
    }

    #[tokio::test]
    async fn test_runs_are_isolated() {
        let (_, first) = secure_pipe_example(None).await.unwrap();
        let (_, second) = secure_pipe_example(None).await.unwrap();

        assert_eq!(first.len(), second.len());
        let ct = |events: &[TransportEvent]| {
            events
                .iter()
                .find(|e| e.kind == EventKind::Encrypted)
                .and_then(|e| e.payload.clone())
        };
        assert_ne!(ct(&first), ct(&second));
    }
}
