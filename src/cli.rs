//! CLI parser
use clap::Parser;
use std::num::NonZeroU16;

#[derive(Parser, Debug)]
/// CLI Options
pub struct CliOptions {
    #[clap(long, help = "Enable debug logging", env = "GHIBLISCAPE_DEBUG")]
    /// Enable debug logging. Env: GHIBLISCAPE_DEBUG
    pub debug: bool,
    #[clap(long, short, default_value = "5000", env = "GHIBLISCAPE_PORT")]
    /// http listener, defaults to `5000`.
    /// Env: GHIBLISCAPE_PORT
    pub port: NonZeroU16,
    #[clap(
        long,
        short,
        default_value = "127.0.0.1",
        env = "GHIBLISCAPE_LISTEN_ADDRESS"
    )]
    /// Listen address, defaults to `127.0.0.1`.
    /// Env: GHIBLISCAPE_LISTEN_ADDRESS
    pub listen_address: String,

    #[clap(long, short, env = "GHIBLISCAPE_CATALOG_PATH")]
    /// Path to the catalog file, eg `/data/database.json`.
    /// Env: GHIBLISCAPE_CATALOG_PATH
    pub catalog_path: Option<String>,
}
