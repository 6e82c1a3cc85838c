//! ArgentBank main entry point

use argentbank_api::start_server;
use argentbank_client::RestBankClient;
use argentbank_config::Config;
use argentbank_core::Store;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "argentbank")]
#[command(author = "ArgentBank Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight online-banking web interface", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let rt = Runtime::new()?;

    rt.block_on(async {
        let config = Config::load(args.config.clone())
            .expect("Failed to load configuration");

        eprintln!("[INFO] Config loaded: backend={}, listen={}:{}",
            config.backend.base_url, config.server.host, config.server.port);

        let client = RestBankClient::new(&config.backend.base_url, config.backend.timeout_secs)
            .expect("Failed to build backend client");

        let store = Arc::new(Store::new(config.clone(), Arc::new(client)));

        start_server(config, store).await
    });

    Ok(())
}
