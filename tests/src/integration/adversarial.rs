//! # Hostile Input
//!
//! A producer that injects junk, truncated tags and forged tags. The
//! receiver must record each one and keep going; nothing escapes the role.

#[cfg(test)]
mod tests {
    use secure_transport::adapters::{pipe, queue};
    use secure_transport::{duplex, RoleContext, SealedMessage};
    use shared_bus::{EventKind, EventLog, Role};
    use shared_crypto::{IntegrityAuthenticator, SecretKey, SecureChannel};
    use std::time::Duration;

    const WAIT: Duration = Duration::from_millis(200);

    struct Fixture {
        key: SecretKey,
        channel: SecureChannel,
        auth: IntegrityAuthenticator,
        log: EventLog,
    }

    impl Fixture {
        fn new() -> Self {
            let key = SecretKey::generate();
            Self {
                channel: SecureChannel::new(key.clone()),
                auth: IntegrityAuthenticator::new(key.clone()),
                key,
                log: EventLog::new(),
            }
        }

        fn receiver(&self) -> RoleContext {
            RoleContext::new(&self.key, self.log.sink().for_role(Role::Receiver), WAIT)
        }

        fn seal(&self, text: &str) -> SealedMessage {
            SealedMessage::seal(&self.channel, &self.auth, text).unwrap()
        }
    }

    #[tokio::test]
    async fn test_queue_survives_mixed_hostile_stream() {
        let fx = Fixture::new();
        let (producer, consumer) = queue::queue();

        // 1. junk bytes
        producer.push(vec![0xFF; 3]).unwrap();
        // 2. valid
        producer.push(fx.seal("first").to_frame().unwrap()).unwrap();
        // 3. truncated tag
        let mut short = fx.seal("short tag");
        short.tag.truncate(16);
        producer.push(short.to_frame().unwrap()).unwrap();
        // 4. forged tag
        let mut forged = fx.seal("forged");
        forged.tag[31] ^= 0x01;
        producer.push(forged.to_frame().unwrap()).unwrap();
        // 5. tampered ciphertext, tag recomputed so only the AEAD catches it
        let mut tampered = fx.seal("tampered");
        let last = tampered.ciphertext.len() - 1;
        tampered.ciphertext[last] ^= 0x01;
        tampered.tag = fx.auth.compute_tag(&tampered.ciphertext).unwrap().to_vec();
        producer.push(tampered.to_frame().unwrap()).unwrap();
        // 6. valid
        producer.push(fx.seal("last").to_frame().unwrap()).unwrap();
        producer.finish().unwrap();

        queue::run_receiver(consumer, fx.receiver()).await;

        let events = fx.log.drain();
        let kinds: Vec<EventKind> = events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::InvalidItem,
                EventKind::Decrypted,
                EventKind::InvalidItem,
                EventKind::AuthFailed,
                EventKind::DecryptError,
                EventKind::Decrypted,
                EventKind::ReceiverDone,
            ]
        );
        assert_eq!(events[1].payload.as_deref(), Some("first"));
        assert_eq!(events[5].payload.as_deref(), Some("last"));
    }

    #[tokio::test]
    async fn test_pipe_rejects_forged_tag_without_decrypting() {
        let fx = Fixture::new();
        let (mut tx_end, rx_end) = duplex();

        let mut forged = fx.seal("Hello Securely through Pipe");
        forged.tag = vec![0u8; forged.tag.len()];
        tx_end.send(forged.to_frame().unwrap(), WAIT).await.unwrap();
        tx_end.close();

        pipe::run_receiver(rx_end, fx.receiver()).await;

        let kinds: Vec<EventKind> = fx.log.drain().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::Received,
                EventKind::AuthFailed,
                EventKind::ReceiverDone
            ]
        );
    }

    #[tokio::test]
    async fn test_pipe_truncated_tag_is_invalid_format() {
        let fx = Fixture::new();
        let (mut tx_end, rx_end) = duplex();

        let mut sealed = fx.seal("x");
        sealed.tag.clear();
        tx_end.send(sealed.to_frame().unwrap(), WAIT).await.unwrap();
        tx_end.close();

        pipe::run_receiver(rx_end, fx.receiver()).await;

        let events = fx.log.drain();
        assert_eq!(events[0].kind, EventKind::InvalidFormat);
        assert_eq!(events.len(), 2);
    }
}
