use std::path::PathBuf;

use clap::Parser;
use shortcode_tonic_core::shortcode::DEFAULT_POOL_SIZE;
use shortcode_tonic_core::types::DEFAULT_SERVER_ADDR;

/// Command-line and environment configuration for the generation service.
#[derive(Debug, Parser)]
#[command(name = "shortcode-tonic-server", version, about)]
pub struct CliArgs {
    /// Address the gRPC listener binds to.
    #[arg(long, env = "SERVER_ADDR", default_value = DEFAULT_SERVER_ADDR)]
    pub addr: String,

    /// Target number of pre-generated codes kept ready in the pool.
    #[arg(long, env = "POOL_SIZE", default_value_t = DEFAULT_POOL_SIZE)]
    pub pool_size: usize,

    /// Path to the consuming API's JSON database of issued codes.
    #[arg(long, env = "DB_PATH", default_value = "db.json")]
    pub db_path: PathBuf,
}

/// Validated server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server_addr: String,
    pub pool_size: usize,
    pub db_path: PathBuf,
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        anyhow::ensure!(args.pool_size > 0, "pool size must be at least 1");
        Ok(Self {
            server_addr: args.addr,
            pool_size: args.pool_size,
            db_path: args.db_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let args = CliArgs::parse_from(["shortcode-tonic-server"]);
        let config = ServerConfig::try_from(args).unwrap();
        assert_eq!(config.server_addr, DEFAULT_SERVER_ADDR);
        assert_eq!(config.pool_size, DEFAULT_POOL_SIZE);
        assert_eq!(config.db_path, PathBuf::from("db.json"));
    }

    #[test]
    fn zero_pool_size_is_rejected() {
        let args = CliArgs::parse_from(["shortcode-tonic-server", "--pool-size", "0"]);
        assert!(ServerConfig::try_from(args).is_err());
    }
}
