//! Command-line interface

use std::path::PathBuf;

use clap::Parser;

use super::constants::{ENV_CONFIG, ENV_HOST, ENV_PORT};

#[derive(Debug, Parser)]
#[command(name = "watchtower")]
#[command(version, about = "Monitoring configuration API", long_about = None)]
pub struct Cli {
    /// Server host address
    #[arg(long, short = 'H', env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', env = ENV_PORT)]
    pub port: Option<u16>,

    /// Path to config file (JSON)
    #[arg(long, short = 'c', env = ENV_CONFIG)]
    pub config: Option<PathBuf>,
}

pub fn parse() -> Cli {
    Cli::parse()
}
