use alloy_primitives::Address;
use chainballot_gateway::app::config::AppConfig;
use chainballot_gateway::app::manifest::{DeploymentManifest, BALLOT_CONTRACT, NFT_CONTRACT};
use std::path::{Path, PathBuf};
use std::process;

/// Compare the deployment manifest against the configured addresses
/// and check the repository files a deployment needs. Exits non-zero
/// when anything is off.
fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => panic!("Invalid configuration: {}", e),
    };

    let mut problems = 0;
    println!(
        "Deployment checklist for {} (chain id {}):",
        config.chain_name, config.chain_id
    );

    let required: Vec<PathBuf> = vec![
        PathBuf::from(".env"),
        config.manifest_file.clone(),
        config.artifacts_dir.join(format!("{}.json", BALLOT_CONTRACT)),
        config.artifacts_dir.join(format!("{}.json", NFT_CONTRACT)),
    ];
    for path in &required {
        problems += check_file(path);
    }

    match DeploymentManifest::load(&config.manifest_file) {
        Ok(info) => {
            if info.chain_id == config.chain_id {
                println!("  [ok]   chain id {} matches", info.chain_id);
            } else {
                println!(
                    "  [FAIL] manifest chain id {} does not match configured {}",
                    info.chain_id, config.chain_id
                );
                problems += 1;
            }
            problems += check_contract(&info, NFT_CONTRACT, config.nft_address);
            problems += check_contract(&info, BALLOT_CONTRACT, config.ballot_address);
        }
        Err(e) => {
            println!(
                "  [FAIL] could not read {}: {}",
                config.manifest_file.display(),
                e
            );
            problems += 1;
        }
    }

    println!();
    if problems > 0 {
        println!("{} problem(s) found", problems);
        process::exit(1);
    }
    println!("Everything checks out");
}

fn check_file(path: &Path) -> u32 {
    if path.exists() {
        println!("  [ok]   {} exists", path.display());
        0
    } else {
        println!("  [FAIL] {} is missing", path.display());
        1
    }
}

fn check_contract(info: &DeploymentManifest, name: &str, configured: Address) -> u32 {
    match info.contracts.get(name) {
        Some(record) if record.address == configured && record.deployed => {
            println!("  [ok]   {} address matches ({})", name, record.address);
            0
        }
        Some(record) if record.address == configured => {
            println!("  [FAIL] {} is not marked as deployed", name);
            1
        }
        Some(record) => {
            println!(
                "  [FAIL] {} address mismatch: manifest {}, configured {}",
                name, record.address, configured
            );
            1
        }
        None => {
            println!("  [FAIL] {} missing from the manifest", name);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest_with(address: Address, deployed: bool) -> DeploymentManifest {
        let mut info = DeploymentManifest::new("Gyansetu AI", 1313161894);
        info.record(BALLOT_CONTRACT, address);
        if !deployed {
            if let Some(record) = info.contracts.get_mut(BALLOT_CONTRACT) {
                record.deployed = false;
            }
        }
        info
    }

    #[test]
    fn matching_deployed_contract_passes() {
        let address = Address::repeat_byte(0x11);
        assert_eq!(check_contract(&manifest_with(address, true), BALLOT_CONTRACT, address), 0);
    }

    #[test]
    fn address_mismatch_is_flagged() {
        let info = manifest_with(Address::repeat_byte(0x11), true);
        assert_eq!(check_contract(&info, BALLOT_CONTRACT, Address::repeat_byte(0x22)), 1);
    }

    #[test]
    fn undeployed_contract_is_flagged() {
        let address = Address::repeat_byte(0x11);
        assert_eq!(check_contract(&manifest_with(address, false), BALLOT_CONTRACT, address), 1);
    }

    #[test]
    fn absent_contract_is_flagged() {
        let info = DeploymentManifest::new("Gyansetu AI", 1313161894);
        assert_eq!(check_contract(&info, NFT_CONTRACT, Address::ZERO), 1);
    }

    #[test]
    fn file_checks_look_at_the_filesystem() {
        let present = std::env::temp_dir().join(format!("verify-{}.txt", rand::random::<u32>()));
        std::fs::write(&present, "x").unwrap();
        assert_eq!(check_file(&present), 0);
        std::fs::remove_file(&present).unwrap();
        assert_eq!(check_file(&present), 1);
    }
}
