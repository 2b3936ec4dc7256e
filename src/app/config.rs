use crate::app::utils::quantity;
use alloy_primitives::Address;
use dotenv::dotenv;
use serde_json::{json, Value};
use std::env;
use std::path::PathBuf;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ALLOWED_ORIGIN: &str = "https://chainballot.vercel.app";
const DEFAULT_READONLY_RPC_URL: &str = "https://0x4e4542a6.rpc.aurora-cloud.dev";
const DEFAULT_CHAIN_ID: u64 = 1313161894;
const DEFAULT_CHAIN_NAME: &str = "Gyansetu AI";
const DEFAULT_CURRENCY_SYMBOL: &str = "GAI";
const DEFAULT_EXPLORER_URL: &str = "https://0x4e4542a6.explorer.aurora-cloud.dev";
const DEFAULT_BALLOT_ADDRESS: &str = "0x9a836494aCB32fb1721eCbe976C13291dd91597f";
const DEFAULT_NFT_ADDRESS: &str = "0xb22d24BE5d608e5BD33d2b5D936A80b74d445CCd";
const DEFAULT_SESSION_FILE: &str = ".chainballot-session.json";
const DEFAULT_READ_CONCURRENCY: usize = 3;
const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";
const DEFAULT_MANIFEST_FILE: &str = "deployment-info.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub allowed_origin: String,
    pub wallet_rpc_url: Option<String>,
    pub readonly_rpc_url: String,
    pub chain_id: u64,
    pub chain_name: String,
    pub currency_symbol: String,
    pub explorer_url: String,
    pub ballot_address: Address,
    pub nft_address: Address,
    pub session_file: PathBuf,
    pub read_concurrency: usize,
    pub artifacts_dir: PathBuf,
    pub manifest_file: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<AppConfig, String> {
        dotenv().ok();
        Ok(AppConfig {
            bind_addr: env_or("BIND_ADDR", DEFAULT_BIND_ADDR),
            allowed_origin: env_or("ALLOWED_ORIGIN", DEFAULT_ALLOWED_ORIGIN),
            wallet_rpc_url: env::var("WALLET_RPC_URL").ok().filter(|v| !v.is_empty()),
            readonly_rpc_url: env_or("READONLY_RPC_URL", DEFAULT_READONLY_RPC_URL),
            chain_id: parse_u64_var("CHAIN_ID", DEFAULT_CHAIN_ID)?,
            chain_name: env_or("CHAIN_NAME", DEFAULT_CHAIN_NAME),
            currency_symbol: env_or("CURRENCY_SYMBOL", DEFAULT_CURRENCY_SYMBOL),
            explorer_url: env_or("EXPLORER_URL", DEFAULT_EXPLORER_URL),
            ballot_address: parse_address_var("BALLOT_ADDRESS", DEFAULT_BALLOT_ADDRESS)?,
            nft_address: parse_address_var("NFT_ADDRESS", DEFAULT_NFT_ADDRESS)?,
            session_file: PathBuf::from(env_or("SESSION_FILE", DEFAULT_SESSION_FILE)),
            read_concurrency: parse_usize_var("READ_CONCURRENCY", DEFAULT_READ_CONCURRENCY)?,
            artifacts_dir: PathBuf::from(env_or("ARTIFACTS_DIR", DEFAULT_ARTIFACTS_DIR)),
            manifest_file: PathBuf::from(env_or("MANIFEST_FILE", DEFAULT_MANIFEST_FILE)),
        })
    }

    /// Network descriptor in the shape `wallet_addEthereumChain` expects.
    pub fn add_chain_params(&self) -> Value {
        json!({
            "chainId": quantity::encode_u64(self.chain_id),
            "chainName": self.chain_name,
            "nativeCurrency": {
                "name": self.chain_name,
                "symbol": self.currency_symbol,
                "decimals": 18,
            },
            "rpcUrls": [self.readonly_rpc_url],
            "blockExplorerUrls": [self.explorer_url],
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_address_var(key: &str, default: &str) -> Result<Address, String> {
    env_or(key, default)
        .parse()
        .map_err(|e| format!("{} is not a valid address: {}", key, e))
}

fn parse_u64_var(key: &str, default: u64) -> Result<u64, String> {
    match env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|e| format!("{} is not a valid number: {}", key, e)),
        Err(_) => Ok(default),
    }
}

fn parse_usize_var(key: &str, default: usize) -> Result<usize, String> {
    match env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|e| format!("{} is not a valid number: {}", key, e)),
        Err(_) => Ok(default),
    }
}
