//! Command line interface of `star-node`

use clap::{Args, Parser, Subcommand};
use std::net::IpAddr;

use crate::logging::LogFormat;
use star_registry::constants::DEFAULT_RPC_PORT;

#[derive(Debug, Parser)]
#[command(name = "star-node", version, about = "Star Registry node")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the node and serve the HTTP API
    Run(RunArgs),
    /// Generate a new key pair and print its address
    Keygen,
    /// Build a challenge message for an address at the current time
    Challenge {
        #[arg(long)]
        address: String,
    },
    /// Sign a challenge message with a hex private key
    Sign(SignArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Interface to bind
    #[arg(long, env = "STAR_NODE_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// HTTP port
    #[arg(long, env = "STAR_NODE_PORT", default_value_t = DEFAULT_RPC_PORT)]
    pub port: u16,

    /// Log output format
    #[arg(long, env = "STAR_NODE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

#[derive(Debug, Args)]
pub struct SignArgs {
    /// Hex encoded private key
    #[arg(long, env = "STAR_NODE_PRIVATE_KEY")]
    pub key: String,

    /// Message to sign
    #[arg(long)]
    pub message: String,
}
