use clap::Parser;
use log::{error, info};
use server::config::{
    DEFAULT_CREDENTIALS_FILE, DEFAULT_PORT, DEFAULT_WORDS_FILE, DEFAULT_WORKERS,
};
use server::{Server, ServerConfig, ServerContext};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server IP address to bind to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Server port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Number of connections served at the same time
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Word list with one `answer,category` pair per line
    #[arg(long, default_value = DEFAULT_WORDS_FILE)]
    words: PathBuf,

    /// Credential file with one `username password` pair per line
    #[arg(long, default_value = DEFAULT_CREDENTIALS_FILE)]
    credentials: PathBuf,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        ServerConfig {
            host: args.host,
            port: args.port,
            workers: args.workers,
            words_path: args.words,
            credentials_path: args.credentials,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let config = ServerConfig::from(Args::parse());

    let context = ServerContext::load(&config)?;
    let server = Server::bind(&config, context).await?;

    let cancel = CancellationToken::new();
    let server_handle = tokio::spawn(server.run(cancel.clone()));

    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down"),
        Err(e) => error!("Failed to listen for Ctrl+C: {}", e),
    }

    cancel.cancel();
    server_handle.await?;

    Ok(())
}
