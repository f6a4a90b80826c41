//! Star Registry Node
//!
//! Runs the registry behind its HTTP API and offers small wallet helpers for
//! producing addresses and signed challenges.

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use cli::{Cli, Commands, RunArgs, SignArgs};
use star_registry::chain::{challenge_message, Clock, SystemClock};
use star_registry::node::StarRegistry;
use star_registry::rpc::start_rpc_server;
use star_registry::wallet::{decode_address, KeyPair};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run_node(args).await,
        Commands::Keygen => {
            let keypair = KeyPair::generate();
            println!("address:     {}", keypair.address);
            println!("private key: {}", hex::encode(keypair.private_key_bytes()));
            Ok(())
        }
        Commands::Challenge { address } => {
            decode_address(&address).context("invalid address")?;
            println!("{}", challenge_message(&address, SystemClock.now()));
            Ok(())
        }
        Commands::Sign(args) => sign(args),
    }
}

async fn run_node(args: RunArgs) -> Result<()> {
    logging::init_logging("star_registry=info,star_node=info", args.log_format);

    let registry = StarRegistry::with_defaults().context("failed to create chain")?;
    let addr = SocketAddr::new(args.host, args.port);
    tracing::info!(%addr, height = registry.height().await, "starting star-node");

    tokio::select! {
        result = start_rpc_server(registry, addr) => {
            result.with_context(|| format!("RPC server on {} failed", addr))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    Ok(())
}

fn sign(args: SignArgs) -> Result<()> {
    let keypair = KeyPair::from_private_key_hex(&args.key).context("invalid private key")?;
    let signature = keypair
        .sign_challenge(&args.message)
        .context("failed to sign message")?;
    println!("address:   {}", keypair.address);
    println!("signature: {}", signature);
    Ok(())
}
