use ncore::client::NcoreClient;
use ncore::config::Config;
use ncore::Result;
use std::sync::Arc;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_file(true)
        .with_line_number(true)
        .init();

    let mut config = match std::env::args().nth(1) {
        Some(path) => Config::load_json_file(&path)?,
        None => Config::default(),
    };
    config.apply_env();
    debug!(base_url = %config.site.base_url, port = config.http_port, "dump config");

    let client = Arc::new(NcoreClient::with_base_url(
        config.credentials(),
        config.site.base_url.clone(),
    )?);

    ncore::app::serve(client, config.http_port).await
}
