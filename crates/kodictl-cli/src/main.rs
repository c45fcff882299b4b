//! # kodictl — terminal remote control for JSON-RPC media players.
//!
//! Reads raw key presses and turns them into one-shot `Input.*` calls
//! against a device configured in `config.toml`. One device per session,
//! no retries, and a failed call never ends the session.

mod keys;
mod session;

use std::path::PathBuf;

use clap::Parser;

use kodictl_common::config::Config;
use kodictl_common::constants;
use kodictl_rpc::RemoteClient;

/// kodictl — remote control for JSON-RPC media players.
#[derive(Parser, Debug)]
#[command(name = constants::BIN_NAME, version, about, long_about = None)]
struct Cli {
    /// Name of the configured host to control.
    host: Option<String>,

    /// Path to the configuration file.
    #[arg(long, env = constants::CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Echo each received key event to stderr.
    #[arg(short, long)]
    verbose: bool,
}

/// Prints the configured host names, one per indented line.
fn print_hosts(header: &str, config: &Config) {
    println!("{header}");
    for name in config.host_names() {
        println!("\t - {name}");
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(constants::config_path);
    let config = Config::load(&config_path)?;

    let Some(host) = cli.host else {
        print_hosts("Missing host name. Hosts configured:", &config);
        return Ok(());
    };
    let Some(device) = config.device(&host) else {
        print_hosts("Invalid host name. Hosts configured:", &config);
        return Ok(());
    };

    let client = RemoteClient::new(device.clone())
        .map_err(|e| anyhow::anyhow!("cannot create RPC client: {e}"))?;
    tracing::info!(host, endpoint = %client.endpoint(), "controlling device");

    session::run(&client, cli.verbose)
}
