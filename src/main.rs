use clap::Parser;
use ghibliscape::config::setup_logging;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main(flavor = "multi_thread", worker_threads = 32)]
async fn main() {
    let cli = ghibliscape::cli::CliOptions::parse();

    if let Err(err) = setup_logging(cli.debug) {
        eprintln!("Failed to set up logging: {}", err);
        return;
    }

    let catalog_path = cli
        .catalog_path
        .unwrap_or_else(|| ghibliscape::constants::DEFAULT_CATALOG_FILE.to_string());

    let catalog = match ghibliscape::catalog::Catalog::load(&catalog_path) {
        Ok(catalog) => catalog,
        Err(err) => {
            error!("Failed to load catalog from {}: {}", catalog_path, err);
            return;
        }
    };
    info!("Loaded catalog with {} images", catalog.len());

    if let Err(err) =
        ghibliscape::web::setup_server(&cli.listen_address, cli.port, Arc::new(catalog)).await
    {
        error!("Application error: {}", err);
    }
}
