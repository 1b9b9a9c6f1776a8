//! Adire Checkout smoke binary.
//!
//! Wires the checkout session against a real backend and reports what a
//! fresh session would see: the shipping catalog (remote or fallback)
//! and the recent-order list (remote, local, or empty). Useful for
//! verifying a deployment without driving the full storefront UI.

#![cfg_attr(not(test), forbid(unsafe_code))]

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adire_checkout::api::CheckoutApiClient;
use adire_checkout::config::CheckoutConfig;
use adire_checkout::history::FileHistoryStore;
use adire_checkout::session::CheckoutSession;

#[tokio::main]
async fn main() {
    // Initialize tracing with EnvFilter.
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "adire_checkout=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CheckoutConfig::from_env().expect("Failed to load configuration");
    tracing::info!(base_url = %config.api_base_url, "checkout configured");

    let backend = CheckoutApiClient::new(&config).expect("Failed to build API client");
    let store = FileHistoryStore::new(config.history_path.clone());

    let mut session = CheckoutSession::new();
    session.refresh_shipping(&backend).await;
    session.refresh_history(&backend, &store).await;

    tracing::info!(
        shipping_locations = session.shipping_options().len(),
        recent_orders = session.orders().len(),
        "checkout session ready"
    );
}
