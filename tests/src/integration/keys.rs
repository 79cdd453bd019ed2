//! # Key Providers and Event Export
//!
//! Drivers fed by passphrase-derived keys, and the JSON shape handed to the
//! presentation layer.

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use secure_transport::{run_pipe, run_shared_store, RunError, TransportConfig};
    use shared_bus::{events_to_json, EventKind};
    use shared_crypto::{
        CryptoError, KeyProvider, PassphraseKeyProvider, SecretKey, StaticKeyProvider,
        DEFAULT_PBKDF2_ITERATIONS,
    };

    struct UnavailableProvider;

    #[async_trait]
    impl KeyProvider for UnavailableProvider {
        async fn provide_key(&self) -> Result<SecretKey, CryptoError> {
            Err(CryptoError::KeyDerivationFailed("keystore locked".into()))
        }
    }

    #[tokio::test]
    async fn test_passphrase_provider_drives_pipe() {
        let provider = PassphraseKeyProvider::with_salt("demo passphrase", [1u8; 16], 1_000);
        let (_, events) = run_pipe(&TransportConfig::default(), &provider)
            .await
            .unwrap();

        assert!(events.iter().any(|e| e.kind == EventKind::Decrypted));
    }

    #[tokio::test]
    async fn test_salt_reproduces_key() {
        let first = PassphraseKeyProvider::new("demo passphrase");
        let again = PassphraseKeyProvider::with_salt(
            "demo passphrase",
            *first.salt(),
            DEFAULT_PBKDF2_ITERATIONS,
        );

        let a = first.provide_key().await.unwrap();
        let b = again.provide_key().await.unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[tokio::test]
    async fn test_empty_passphrase_is_run_error() {
        let provider = PassphraseKeyProvider::with_salt("", [0u8; 16], 1_000);
        let result = run_shared_store(&TransportConfig::default(), &provider).await;
        assert!(matches!(result, Err(RunError::KeyProvisioning(_))));
    }

    #[tokio::test]
    async fn test_provider_failure_surfaces_before_any_event() {
        let result = run_pipe(&TransportConfig::default(), &UnavailableProvider).await;
        match result {
            Err(RunError::KeyProvisioning(e)) => assert!(e.to_string().contains("keystore locked")),
            other => panic!("expected key provisioning error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_events_export_as_kind_payload_pairs() {
        let provider = StaticKeyProvider::new(SecretKey::from_bytes([0x42; 32]));
        let (_, events) = run_shared_store(&TransportConfig::default(), &provider)
            .await
            .unwrap();
        let json = events_to_json(&events).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        let items = parsed.as_array().unwrap();
        assert_eq!(items.len(), events.len());
        assert_eq!(items[0]["kind"], "written");
        assert_eq!(items[1]["kind"], "writer_done");
        assert!(items[1]["payload"].is_null());
        assert_eq!(items[3]["payload"], "Shared Secure Data (sensitive)");
    }
}
