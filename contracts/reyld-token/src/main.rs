//! REYLD Token - Deploy Entry Point
//!
//! Constructs the contract for the given owner and reports the genesis
//! state.
//!
//! Usage:
//!   reyld-token-deploy --owner 0x0Bb18a1674044D7DfA9A72A1EE5a82f4e7f89b0E

use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use reyld_common::types::format_address;

/// Owner used by the reference deployment
const DEFAULT_OWNER: &str = "0x0Bb18a1674044D7DfA9A72A1EE5a82f4e7f89b0E";

#[derive(Parser, Debug)]
#[command(name = "reyld-token-deploy")]
#[command(about = "Deploy the REYLD token and mint the full supply to the owner")]
struct Args {
    /// Initial owner address (hex, 0x-prefixed)
    #[arg(short, long, default_value = DEFAULT_OWNER)]
    owner: String,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let token = match reyld_token::deploy(&args.owner) {
        Ok(token) => token,
        Err(e) => {
            error!("Deployment failed for owner {}: {}", args.owner, e);
            return ExitCode::FAILURE;
        }
    };

    let (whole, frac) = token.total_supply().split_decimals();

    info!("Deployed {} ({})", token.name(), token.symbol());
    info!("  decimals:     {}", token.decimals());
    info!("  total supply: {} (+{} base units)", whole, frac);
    info!("  owner:        {}", format_address(&token.owner()));
    info!("  state digest: 0x{}", hex::encode(token.state_digest()));

    ExitCode::SUCCESS
}
