use std::sync::Arc;

use poem::listener::TcpListener;

use mcrgate::api::routes;
use mcrgate::config::Config;
use mcrgate::mcr::McrService;
use mcrgate::megaport::{MegaportClient, ProductClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();

    if std::env::var("LOG_FORMAT").map(|f| f == "json").unwrap_or(false) {
        mcrgate::logging::init_json();
    } else {
        mcrgate::logging::init();
    }

    let client = Arc::new(
        MegaportClient::new(&config)
            .map_err(|e| format!("Failed to create Megaport client: {}", e))?,
    );
    let products = Arc::new(ProductClient::new(Arc::clone(&client)));
    let service = Arc::new(McrService::new(client, products).with_poll_config(config.poll_config()));

    let addr = format!("0.0.0.0:{}", config.port);
    let app = routes(service, &format!("http://localhost:{}", config.port));

    tracing::info!(
        "Starting mcrgate on {} against {}",
        addr,
        config.megaport_url
    );

    poem::Server::new(TcpListener::bind(&addr)).run(app).await?;

    Ok(())
}
