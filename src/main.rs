//! Fura Chat desktop entry point

use fura_chat::app::{App, Bootstrap};
use fura_chat::session::client::ChatClient;
use fura_chat::types::config::ClientConfig;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fura_chat=info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = ClientConfig::from_env();
    tracing::info!("Chat endpoint: {}", config.api_base);

    let client = match ChatClient::new(config.api_base.clone()) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!("Failed to create HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let window = dioxus::desktop::WindowBuilder::new().with_title("Fura Chat");
    dioxus::LaunchBuilder::desktop()
        .with_cfg(dioxus::desktop::Config::new().with_window(window))
        .with_context(Bootstrap { config, client })
        .launch(App);
}
