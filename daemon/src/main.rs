mod config;
mod controller;
mod protocol;
mod server;
mod source;
mod widget;

use anyhow::Result;
use config::DaemonConfig;
use server::TypeaheadServer;
use source::SuggestionClient;
use tracing::info;
use tracing_subscriber::EnvFilter;
use widget::WidgetOptions;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = DaemonConfig::load()?;
    info!(
        socket = %config.server.socket_path.display(),
        backend = ?config.source.backend,
        base_url = %config.endpoint.base_url,
        request_timeout_ms = config.endpoint.request_timeout_ms,
        debounce_ms = config.input.debounce_ms,
        blur_grace_ms = config.input.blur_grace_ms,
        "loaded typeahead config"
    );
    let client = SuggestionClient::from_config(&config.endpoint, &config.source);
    let options = WidgetOptions::from(&config.input);
    let server = TypeaheadServer::new(config.server, client, options);
    server.run().await
}
