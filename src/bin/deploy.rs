use alloy_primitives::{hex, Address, B256};
use alloy_sol_types::SolValue;
use chainballot_gateway::app::chain::access_nft::{AccessNft, GAS_MINT};
use chainballot_gateway::app::chain::error::ChainError;
use chainballot_gateway::app::chain::rpc::{RpcClient, TransactionRequest};
use chainballot_gateway::app::config::AppConfig;
use chainballot_gateway::app::manifest::{DeploymentManifest, BALLOT_CONTRACT, NFT_CONTRACT};
use chainballot_gateway::app::utils::quantity;
use chrono::Utc;
use serde_json::Value;
use std::fs;
use std::io::{Error, ErrorKind};
use std::path::Path;
use std::process;

/// Deploy both contracts from their compiled artifacts, mint a test
/// access NFT to the deployer and write the deployment manifest.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => panic!("Invalid configuration: {}", e),
    };
    let node_url = match &config.wallet_rpc_url {
        Some(url) => url.clone(),
        None => {
            eprintln!("WALLET_RPC_URL must point at a node with an unlocked account");
            process::exit(1);
        }
    };
    let node = RpcClient::new(&node_url);

    let chain_id = match node.chain_id().await {
        Ok(chain_id) => chain_id,
        Err(e) => {
            eprintln!("Could not reach node at {}: {}", node_url, e);
            process::exit(1);
        }
    };
    if chain_id != config.chain_id {
        eprintln!(
            "Node reports chain id {}, expected {}. Check WALLET_RPC_URL",
            chain_id, config.chain_id
        );
        process::exit(1);
    }

    let deployer = match node.accounts().await {
        Ok(accounts) if !accounts.is_empty() => accounts[0],
        Ok(_) => {
            eprintln!("Node has no unlocked accounts");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Could not list accounts: {}", e);
            process::exit(1);
        }
    };
    println!("Deploying contracts with account {}", deployer);

    let mut nft_code = load_bytecode(&config.artifacts_dir, NFT_CONTRACT)?;
    nft_code.extend(("Voting Power NFT".to_string(), "VPNFT".to_string()).abi_encode_params());
    let nft_address = deploy_contract(&node, deployer, nft_code).await?;
    println!("{} deployed to {}", NFT_CONTRACT, nft_address);

    let ballot_code = load_bytecode(&config.artifacts_dir, BALLOT_CONTRACT)?;
    let ballot_address = deploy_contract(&node, deployer, ballot_code).await?;
    println!("{} deployed to {}", BALLOT_CONTRACT, ballot_address);

    // A mint failure is not fatal, the contracts are already live
    match mint_test_nft(&node, deployer, nft_address).await {
        Ok(hash) => println!("Test NFT minted to the deployer in {}", hash),
        Err(e) => eprintln!("Test mint failed: {}", e),
    }

    let mut info = DeploymentManifest::new(&config.chain_name, config.chain_id);
    info.record(NFT_CONTRACT, nft_address);
    info.record(BALLOT_CONTRACT, ballot_address);
    info.deployer = Some(deployer);
    info.last_deployment = Some(Utc::now());
    info.store(&config.manifest_file)?;
    println!("Manifest written to {}", config.manifest_file.display());

    println!();
    println!("Next steps:");
    println!("  1. cargo run --bin update-addresses {} {}", nft_address, ballot_address);
    println!("  2. cargo run --bin verify-deployment");
    Ok(())
}

fn load_bytecode(dir: &Path, name: &str) -> Result<Vec<u8>, Error> {
    let path = dir.join(format!("{}.json", name));
    let raw = fs::read_to_string(&path)?;
    let artifact: Value = serde_json::from_str(&raw)
        .map_err(|e| Error::new(ErrorKind::InvalidData, format!("{}: {}", path.display(), e)))?;
    let bytecode = artifact["bytecode"].as_str().ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidData,
            format!("{} has no bytecode field", path.display()),
        )
    })?;
    hex::decode(bytecode.trim()).map_err(|e| {
        Error::new(
            ErrorKind::InvalidData,
            format!("{} bytecode is not hex: {}", path.display(), e),
        )
    })
}

async fn deploy_contract(node: &RpcClient, from: Address, code: Vec<u8>) -> Result<Address, Error> {
    let gas_price = node.gas_price().await.map_err(to_io)?;
    let tx = TransactionRequest {
        from,
        to: None,
        data: hex::encode_prefixed(&code),
        gas: None,
        gas_price: Some(quantity::encode_u256(gas_price)),
    };
    let receipt = node.send_and_confirm(&tx).await.map_err(to_io)?;
    receipt
        .contract_address
        .ok_or_else(|| Error::new(ErrorKind::Other, "receipt carries no contract address"))
}

async fn mint_test_nft(node: &RpcClient, deployer: Address, nft: Address) -> Result<B256, Error> {
    let gas_price = node.gas_price().await.map_err(to_io)?;
    let tx = TransactionRequest {
        from: deployer,
        to: Some(nft),
        data: hex::encode_prefixed(AccessNft::mint_call_data(deployer)),
        gas: Some(quantity::encode_u64(GAS_MINT)),
        gas_price: Some(quantity::encode_u256(gas_price)),
    };
    let receipt = node.send_and_confirm(&tx).await.map_err(to_io)?;
    Ok(receipt.transaction_hash)
}

fn to_io(e: ChainError) -> Error {
    Error::new(ErrorKind::Other, e.to_string())
}
