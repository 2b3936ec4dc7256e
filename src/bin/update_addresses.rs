use alloy_primitives::Address;
use chainballot_gateway::app::config::AppConfig;
use chainballot_gateway::app::manifest::{
    rewrite_env_addresses, DeploymentManifest, BALLOT_CONTRACT, NFT_CONTRACT,
};
use chrono::Utc;
use std::env;
use std::fs;
use std::path::Path;
use std::process;

/// Propagate freshly deployed contract addresses into `.env` and the
/// deployment manifest.
fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: update-addresses <nft-address> <ballot-address>");
        process::exit(1);
    }
    let nft: Address = match args[1].parse() {
        Ok(address) => address,
        Err(e) => {
            eprintln!("Invalid NFT address {:?}: {}", args[1], e);
            process::exit(1);
        }
    };
    let ballot: Address = match args[2].parse() {
        Ok(address) => address,
        Err(e) => {
            eprintln!("Invalid ballot address {:?}: {}", args[2], e);
            process::exit(1);
        }
    };

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => panic!("Invalid configuration: {}", e),
    };

    let env_path = Path::new(".env");
    let content = if env_path.exists() {
        fs::read_to_string(env_path)?
    } else {
        String::new()
    };
    fs::write(env_path, rewrite_env_addresses(&content, nft, ballot))?;
    println!("Updated {} with the new addresses", env_path.display());

    let mut info = match DeploymentManifest::load(&config.manifest_file) {
        Ok(info) => info,
        Err(e) => {
            log::warn!("starting a fresh manifest: {}", e);
            DeploymentManifest::new(&config.chain_name, config.chain_id)
        }
    };
    info.record(NFT_CONTRACT, nft);
    info.record(BALLOT_CONTRACT, ballot);
    info.last_deployment = Some(Utc::now());
    info.store(&config.manifest_file)?;
    println!("Updated {}", config.manifest_file.display());

    println!();
    println!("{}: {}", NFT_CONTRACT, nft);
    println!("{}: {}", BALLOT_CONTRACT, ballot);
    Ok(())
}
