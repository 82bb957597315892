use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Identity repository service shell
#[derive(Debug, Parser)]
#[command(name = "idrepo", about = "Identity repository service with fault translation")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "idrepo.toml", env = "IDREPO_CONFIG")]
    pub config: PathBuf,

    /// Override the configured listen address
    #[arg(long, env = "IDREPO_LISTEN")]
    pub listen: Option<SocketAddr>,
}
