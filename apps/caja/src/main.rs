//! # puntos-caja
//!
//! Terminal front end for the loyalty program: the cashier's scanner
//! register plus the member account flows.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Startup Sequence                                │
//! │                                                                         │
//! │  1. init_tracing()       RUST_LOG or "info,puntos=debug", to stderr     │
//! │  2. Cli::parse()         clap subcommand                                │
//! │  3. ClientConfig::load   defaults → caja.toml → PUNTOS_* env           │
//! │  4. LoyaltyClient::new   reqwest + session (token file if enabled)      │
//! │  5. dispatch             commands::*                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use puntos_client::{ClientConfig, LoyaltyClient};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "puntos-caja", version, about = "Loyalty points register")]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in as a cashier
    Login {
        username: String,
        /// Read from stdin when omitted
        #[arg(long, env = "PUNTOS_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored cashier token
    Logout,
    /// Interactive register fed by the QR scanner
    Scan,
    /// Show a customer's points summary
    Balance { customer_id: i64 },
    /// Show a customer's movements
    History { customer_id: i64 },
    /// Print the payload of a customer's QR code
    Qr { customer_id: i64 },
    /// Member account flows
    Customer {
        #[command(subcommand)]
        command: commands::customer::CustomerCommand,
    },
    /// Show or write the configuration
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommand,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = ClientConfig::load(cli.config.clone())?;
    debug!(base_url = config.base_url(), "Configuration loaded");

    match cli.command {
        Command::Config { command } => commands::config::run(&command, &config, cli.config),
        Command::Qr { customer_id } => commands::lookup::qr(customer_id),
        Command::Login { username, password } => {
            commands::session::login(&connect(&config)?, &username, password).await
        }
        Command::Logout => commands::session::logout(&connect(&config)?).await,
        Command::Scan => commands::scanner::run(connect(&config)?, config.accrual_rate()).await,
        Command::Balance { customer_id } => {
            commands::lookup::balance(&connect(&config)?, customer_id).await
        }
        Command::History { customer_id } => {
            commands::lookup::history(&connect(&config)?, customer_id).await
        }
        Command::Customer { command } => {
            commands::customer::run(&connect(&config)?, command).await
        }
    }
}

fn connect(config: &ClientConfig) -> anyhow::Result<LoyaltyClient> {
    Ok(LoyaltyClient::new(config)?)
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so the register output on stdout stays readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,puntos=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
