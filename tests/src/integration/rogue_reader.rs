//! # Rogue Reader
//!
//! The writer stores a token under key K1; a reader holding an unrelated
//! key K2 reads the same slot. It must see the ciphertext and fail to
//! decrypt it, never recovering the plaintext.

#[cfg(test)]
mod tests {
    use secure_transport::adapters::shared_store::{run_reader, run_writer};
    use secure_transport::{RoleContext, SharedSlot};
    use shared_bus::{EventKind, EventLog, Role, TransportEvent};
    use shared_crypto::{derive_key_from_passphrase, SecretKey};
    use std::sync::Arc;
    use std::time::Duration;

    const WAIT: Duration = Duration::from_millis(200);
    const SECRET: &str = "Shared Secure Data (sensitive)";

    async fn rogue_read(writer_key: SecretKey, reader_key: SecretKey) -> Vec<TransportEvent> {
        let slot = Arc::new(SharedSlot::new());
        let log = EventLog::new();

        let writer_slot = Arc::clone(&slot);
        let writer_ctx = RoleContext::new(&writer_key, log.sink().for_role(Role::Writer), WAIT);
        tokio::spawn(async move {
            run_writer(&writer_slot, writer_ctx, SECRET.to_string()).await;
        })
        .await
        .unwrap();

        slot.wait_for_writer(WAIT).await.unwrap();
        run_reader(
            &slot,
            RoleContext::new(&reader_key, log.sink().for_role(Role::Reader), WAIT),
        )
        .await;

        log.drain()
    }

    #[tokio::test]
    async fn test_rogue_reader_cannot_decrypt() {
        let events = rogue_read(SecretKey::generate(), SecretKey::generate()).await;

        let kinds: Vec<EventKind> = events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::Written,
                EventKind::WriterDone,
                EventKind::Read,
                EventKind::DecryptError,
                EventKind::ReaderDone,
            ]
        );
        // Same bytes observed on both sides.
        assert_eq!(events[0].payload, events[2].payload);
        assert!(events
            .iter()
            .filter_map(|e| e.payload.as_deref())
            .all(|p| !p.contains(SECRET)));
    }

    #[tokio::test]
    async fn test_rogue_reader_with_wrong_passphrase() {
        let salt = [7u8; 16];
        let k1 = derive_key_from_passphrase("correct horse", &salt, 1_000).unwrap();
        let k2 = derive_key_from_passphrase("battery staple", &salt, 1_000).unwrap();

        let events = rogue_read(k1, k2).await;
        assert_eq!(events[3].kind, EventKind::DecryptError);
    }

    #[tokio::test]
    async fn test_legitimate_reader_with_same_passphrase() {
        let salt = [7u8; 16];
        let k1 = derive_key_from_passphrase("correct horse", &salt, 1_000).unwrap();
        let k2 = derive_key_from_passphrase("correct horse", &salt, 1_000).unwrap();

        let events = rogue_read(k1, k2).await;
        assert_eq!(events[3].kind, EventKind::Decrypted);
        assert_eq!(events[3].payload.as_deref(), Some(SECRET));
    }
}
