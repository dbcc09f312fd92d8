// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `courier serve`: wire the adapters into a relay and run the HTTP server.

use std::sync::Arc;

use courier_config::model::CourierConfig;
use courier_core::CourierError;
use courier_core::traits::{MessageStore, Messenger};
use courier_gateway::GatewayState;
use courier_relay::{Relay, RelaySettings};
use courier_store::PostgrestStore;
use courier_telegram::TelegramMessenger;
use tracing::{info, warn};

use crate::shutdown;

/// Runs the relay until SIGINT or SIGTERM.
pub async fn run_serve(config: CourierConfig) -> Result<(), CourierError> {
    init_tracing(&config.server.log_level);

    let relay = build_relay(&config)?;
    if !relay.is_configured() {
        warn!("relay is not fully configured; POST requests will be refused");
    }

    let state = GatewayState {
        relay: Arc::new(relay),
    };
    let cancel = shutdown::install_signal_handler();

    info!(version = env!("CARGO_PKG_VERSION"), "courier starting");
    courier_gateway::start_server(&config.server, state, cancel).await
}

/// Builds the relay from whichever adapters have credentials.
///
/// A missing credential leaves that side empty rather than failing startup.
pub fn build_relay(config: &CourierConfig) -> Result<Relay, CourierError> {
    let store: Option<Arc<dyn MessageStore>> = if config.storage.is_configured() {
        let store = PostgrestStore::new(&config.storage)?;
        info!(endpoint = %store.endpoint(), "message store configured");
        Some(Arc::new(store))
    } else {
        warn!("storage url or api key missing");
        None
    };

    let messenger: Option<Arc<dyn Messenger>> = if config.telegram.is_configured() {
        info!("telegram bot configured");
        Some(Arc::new(TelegramMessenger::new(&config.telegram)?))
    } else {
        warn!("telegram bot token or chat id missing");
        None
    };

    Ok(Relay::new(
        store,
        messenger,
        RelaySettings::from(&config.relay),
    ))
}

/// Initializes the tracing subscriber. `RUST_LOG` wins over `log_level`.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("courier={log_level},tower_http={log_level},warn"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(toml: &str) -> CourierConfig {
        courier_config::load_and_validate_str(toml).unwrap()
    }

    #[test]
    fn unconfigured_relay_still_builds() {
        let relay = build_relay(&config("")).unwrap();
        assert!(!relay.is_configured());
    }

    #[test]
    fn half_configured_relay_is_not_ready() {
        let relay = build_relay(&config(
            r#"
            [telegram]
            bot_token = "123456:test-token"
            chat_id = "-1001234"
            "#,
        ))
        .unwrap();
        assert!(!relay.is_configured());
    }

    #[test]
    fn full_credentials_configure_both_sides() {
        let relay = build_relay(&config(
            r#"
            [telegram]
            bot_token = "123456:test-token"
            chat_id = "-1001234"

            [storage]
            url = "https://project.supabase.co"
            api_key = "sb_publishable_test"
            "#,
        ))
        .unwrap();
        assert!(relay.is_configured());
    }
}
