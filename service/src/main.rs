//! Network segmentation demo service entry point

use clap::Parser;
use netseg_service::cli::Cli;
use netseg_service::{logging, server};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.log_level.as_deref(), cli.log_format) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    info!("netseg-service v{}", env!("CARGO_PKG_VERSION"));

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    if let Err(e) = server::run(config).await {
        error!(error = %e, "Service stopped");
        std::process::exit(1);
    }
}
