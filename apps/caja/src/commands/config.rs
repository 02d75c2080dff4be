//! Show or write the configuration file.

use std::path::PathBuf;

use clap::Subcommand;
use puntos_client::ClientConfig;

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration (file + environment)
    Show,
    /// Write the effective configuration to the config file
    Init,
}

pub fn run(
    command: &ConfigCommand,
    config: &ClientConfig,
    path: Option<PathBuf>,
) -> anyhow::Result<()> {
    match command {
        ConfigCommand::Show => {
            println!("base_url      = {}", config.base_url());
            println!("timeout       = {}s", config.api.timeout_secs);
            println!("accrual       = {} bps", config.points.accrual_bps);
            match config.token_path() {
                Some(p) => println!("token file    = {}", p.display()),
                None => println!("token file    = (memory only)"),
            }
            if let Some(p) = path.or_else(ClientConfig::default_config_path) {
                println!("config file   = {}", p.display());
            }
        }
        ConfigCommand::Init => {
            config.save(path.clone())?;
            if let Some(p) = path.or_else(ClientConfig::default_config_path) {
                println!("Wrote {}", p.display());
            }
        }
    }
    Ok(())
}
