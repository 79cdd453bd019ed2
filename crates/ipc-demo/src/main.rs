//! # Secure-IPC Demo
//!
//! Runs each transport once and prints what happened.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging from `SIPC_*` variables
//! 2. Load transport configuration
//! 3. Pick a key provider (passphrase if `SIPC_PASSPHRASE` is set, random otherwise)
//! 4. Run pipe, queue, shared store in turn
//! 5. Print each report, plus the JSON event stream if `SIPC_EVENTS_JSON` is set

use anyhow::{Context, Result};
use ipc_telemetry::{init_logging, parse_flag, TelemetryConfig};
use secure_transport::{
    run_pipe, run_queue, run_shared_store, DemoOutput, RunError, TransportConfig, TransportKind,
};
use shared_bus::events_to_json;
use shared_crypto::{KeyProvider, PassphraseKeyProvider, RandomKeyProvider};
use tracing::info;

/// Demo-level settings that are not transport configuration.
struct DemoConfig {
    passphrase: Option<String>,
    events_json: bool,
}

impl DemoConfig {
    fn from_env() -> Self {
        Self {
            passphrase: std::env::var("SIPC_PASSPHRASE")
                .ok()
                .filter(|p| !p.is_empty()),
            events_json: std::env::var("SIPC_EVENTS_JSON")
                .map(|v| parse_flag(&v, false))
                .unwrap_or(false),
        }
    }

    fn key_provider(&self) -> Box<dyn KeyProvider> {
        match &self.passphrase {
            Some(passphrase) => {
                let provider = PassphraseKeyProvider::new(passphrase.as_str());
                info!(salt = %hex::encode(provider.salt()), "Using passphrase-derived key");
                Box::new(provider)
            }
            None => {
                info!("Using a fresh random key per run");
                Box::new(RandomKeyProvider)
            }
        }
    }
}

async fn run(
    kind: TransportKind,
    config: &TransportConfig,
    keys: &dyn KeyProvider,
) -> Result<DemoOutput, RunError> {
    match kind {
        TransportKind::Pipe => run_pipe(config, keys).await,
        TransportKind::MessageQueue => run_queue(config, keys).await,
        TransportKind::SharedStore => run_shared_store(config, keys).await,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let telemetry = TelemetryConfig::from_env();
    init_logging(&telemetry).context("Failed to initialize logging")?;

    let config = TransportConfig::from_env();
    let demo = DemoConfig::from_env();
    let keys = demo.key_provider();

    info!(
        service = %telemetry.service_name,
        wait_timeout = ?config.wait_timeout,
        "Secure-IPC demo starting"
    );

    for kind in [
        TransportKind::Pipe,
        TransportKind::MessageQueue,
        TransportKind::SharedStore,
    ] {
        let (report, events) = run(kind, &config, keys.as_ref())
            .await
            .with_context(|| format!("{} run failed", kind.display_name()))?;

        println!("{report}");
        if demo.events_json {
            let json = events_to_json(&events).context("Failed to serialize events")?;
            println!("{json}");
        }
        println!();
    }

    info!("Secure-IPC demo finished");
    Ok(())
}
