// Entrypoint for the CLI application.
// - Keeps `main` small: parse flags, set up logging, build the API client
//   and hand it to the UI.
// - Returns `anyhow::Result` so any failure ends the run with a non-zero
//   exit and the error chain on stderr.

use anyhow::Context;
use clap::Parser;
use rfid_lookup::{api::ApiClient, config::ClientOptions, env::Env, ui};
use tracing_subscriber::EnvFilter;

/// Look up the user behind an RFID badge.
#[derive(Parser, Debug)]
#[command(name = "rfid-lookup", version)]
struct Cli {
    /// RFID to look up. Prompted for when omitted.
    #[arg(long)]
    rfid: Option<String>,

    /// API public key. Defaults to $RC_PUBLIC_KEY.
    #[arg(long)]
    public_key: Option<String>,

    /// API private key. Defaults to $RC_PRIVATE_KEY.
    #[arg(long)]
    private_key: Option<String>,

    /// API base URL. Defaults to $RC_API_URL, then http://localhost:8000.
    #[arg(long)]
    api_url: Option<String>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ClientOptions {
        api_url: cli.api_url,
        public_key: cli.public_key,
        private_key: cli.private_key,
    }
    .resolve(&Env::real())
    .context("Invalid client configuration")?;

    let api = ApiClient::new(config)?;
    ui::run(&api, cli.rfid)?;
    Ok(())
}

/// `RUST_LOG` wins when set; otherwise the level follows `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
