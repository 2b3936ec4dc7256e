use alloy_primitives::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{Error, ErrorKind};
use std::path::Path;

pub const NFT_CONTRACT: &str = "VotingPowerNFT";
pub const BALLOT_CONTRACT: &str = "ChainBallot";

/// On-disk record of what was deployed where, written by `deploy` and
/// kept current by `update-addresses`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DeploymentManifest {
    #[serde(rename = "network")]
    pub network: String,

    #[serde(rename = "chainId")]
    pub chain_id: u64,

    #[serde(rename = "contracts")]
    pub contracts: BTreeMap<String, ContractRecord>,

    #[serde(rename = "deployer")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployer: Option<Address>,

    #[serde(rename = "lastDeployment")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_deployment: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ContractRecord {
    #[serde(rename = "address")]
    pub address: Address,

    #[serde(rename = "deployed")]
    pub deployed: bool,
}

impl DeploymentManifest {
    pub fn new(network: &str, chain_id: u64) -> DeploymentManifest {
        DeploymentManifest {
            network: network.to_string(),
            chain_id,
            contracts: BTreeMap::new(),
            deployer: None,
            last_deployment: None,
        }
    }

    pub fn load(path: &Path) -> Result<DeploymentManifest, Error> {
        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| Error::new(ErrorKind::InvalidData, e.to_string()))
    }

    pub fn store(&self, path: &Path) -> Result<(), Error> {
        let raw = serde_json::to_string_pretty(self)
            .map_err(|e| Error::new(ErrorKind::InvalidData, e.to_string()))?;
        fs::write(path, raw)
    }

    pub fn record(&mut self, name: &str, address: Address) {
        self.contracts.insert(
            name.to_string(),
            ContractRecord {
                address,
                deployed: true,
            },
        );
    }

    pub fn address_of(&self, name: &str) -> Option<Address> {
        self.contracts.get(name).map(|record| record.address)
    }
}

/// Rewrite the NFT_ADDRESS and BALLOT_ADDRESS lines of an env file,
/// appending them when missing. Every other line stays untouched.
pub fn rewrite_env_addresses(content: &str, nft: Address, ballot: Address) -> String {
    let mut saw_nft = false;
    let mut saw_ballot = false;
    let mut lines: Vec<String> = Vec::new();

    for line in content.lines() {
        if line.starts_with("NFT_ADDRESS=") {
            lines.push(format!("NFT_ADDRESS={}", nft));
            saw_nft = true;
        } else if line.starts_with("BALLOT_ADDRESS=") {
            lines.push(format!("BALLOT_ADDRESS={}", ballot));
            saw_ballot = true;
        } else {
            lines.push(line.to_string());
        }
    }
    if !saw_nft {
        lines.push(format!("NFT_ADDRESS={}", nft));
    }
    if !saw_ballot {
        lines.push(format!("BALLOT_ADDRESS={}", ballot));
    }

    let mut result = lines.join("\n");
    result.push('\n');
    result
}
