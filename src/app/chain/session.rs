use crate::app::chain::error::{ChainError, ChainResult};
use crate::app::chain::rpc::{RpcClient, TransactionRequest, TxReceipt};
use crate::app::config::AppConfig;
use crate::app::utils::quantity;
use alloy_primitives::{hex, Address};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tokio::sync::watch;

// EIP-3085: the wallet does not know the chain yet
const CODE_UNKNOWN_CHAIN: i64 = 4902;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    #[serde(rename = "walletDetected")]
    pub wallet_detected: bool,

    #[serde(rename = "account")]
    pub account: Option<Address>,

    #[serde(rename = "chainId")]
    pub chain_id: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    account: Address,
}

fn load_session(path: &Path) -> Option<Address> {
    let raw = fs::read_to_string(path).ok()?;
    let stored: StoredSession = serde_json::from_str(&raw).ok()?;
    Some(stored.account)
}

fn store_session(path: &Path, account: Address) {
    let stored = StoredSession { account };
    match serde_json::to_string_pretty(&stored) {
        Ok(raw) => {
            if let Err(e) = fs::write(path, raw) {
                log::warn!("could not persist session to {}: {}", path.display(), e);
            }
        }
        Err(e) => log::warn!("could not serialize session: {}", e),
    }
}

fn clear_session(path: &Path) {
    let _ = fs::remove_file(path);
}

/// Wallet session adapter. Talks to the wallet endpoint for accounts,
/// network management and transaction submission; publishes every
/// account or chain change on a watch channel.
pub struct ChainSession {
    wallet: Option<RpcClient>,
    config: AppConfig,
    notify: watch::Sender<SessionSnapshot>,
}

impl ChainSession {
    pub fn new(config: &AppConfig) -> ChainSession {
        let wallet = config.wallet_rpc_url.as_deref().map(RpcClient::new);
        let (notify, _) = watch::channel(SessionSnapshot {
            wallet_detected: false,
            account: None,
            chain_id: None,
        });
        ChainSession {
            wallet,
            config: config.clone(),
            notify,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.notify.borrow().clone()
    }

    pub fn account(&self) -> Option<Address> {
        self.notify.borrow().account
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.notify.subscribe()
    }

    /// Probe the wallet endpoint and restore a stored session. A stored
    /// account survives only while the wallet still lists it.
    pub async fn detect(&self) {
        let wallet = match &self.wallet {
            Some(wallet) => wallet,
            None => {
                log::info!("no wallet endpoint configured, running read-only");
                return;
            }
        };
        let chain = match wallet.chain_id().await {
            Ok(chain) => chain,
            Err(e) => {
                log::warn!("wallet endpoint unreachable, running read-only: {}", e);
                return;
            }
        };
        let account = match load_session(&self.config.session_file) {
            Some(stored) => match wallet.accounts().await {
                Ok(accounts) if accounts.contains(&stored) => Some(stored),
                Ok(_) => {
                    log::info!("stored account {} no longer available, clearing session", stored);
                    clear_session(&self.config.session_file);
                    None
                }
                Err(e) => {
                    log::warn!("could not verify stored session: {}", e);
                    None
                }
            },
            None => None,
        };
        self.notify.send_modify(|s| {
            s.wallet_detected = true;
            s.account = account;
            s.chain_id = Some(chain);
        });
        log::info!("wallet endpoint detected on chain id {}", chain);
    }

    /// Re-read account and chain state and publish any change. Called at
    /// the top of every page that renders session dependent content.
    pub async fn refresh(&self) {
        let wallet = match &self.wallet {
            Some(wallet) => wallet,
            None => return,
        };
        let current = self.snapshot();
        if !current.wallet_detected {
            return;
        }
        let accounts = match wallet.accounts().await {
            Ok(accounts) => accounts,
            Err(e) => {
                log::warn!("session refresh failed: {}", e);
                return;
            }
        };
        let account = current.account.filter(|a| accounts.contains(a));
        if account.is_none() && current.account.is_some() {
            log::info!("connected account no longer available, session cleared");
            clear_session(&self.config.session_file);
        }
        let chain_id = match wallet.chain_id().await {
            Ok(chain) => Some(chain),
            Err(_) => current.chain_id,
        };
        if account != current.account || chain_id != current.chain_id {
            self.notify.send_modify(|s| {
                s.account = account;
                s.chain_id = chain_id;
            });
        }
    }

    /// Prompting connect: request accounts, make sure the wallet is on
    /// the expected network, persist the session.
    pub async fn connect(&self) -> ChainResult<SessionSnapshot> {
        let wallet = self.wallet.as_ref().ok_or(ChainError::ProviderMissing)?;
        let accounts = match wallet.request_accounts().await {
            Ok(accounts) => accounts,
            Err(ChainError::CallFailed { code: None, message }) => {
                log::warn!("wallet endpoint not usable: {}", message);
                return Err(ChainError::ProviderMissing);
            }
            Err(e) => return Err(e),
        };
        let account = match accounts.first() {
            Some(account) => *account,
            None => {
                return Err(ChainError::CallFailed {
                    code: None,
                    message: "Wallet returned no accounts".to_string(),
                });
            }
        };
        self.ensure_chain(wallet).await?;
        store_session(&self.config.session_file, account);
        self.notify.send_modify(|s| {
            s.wallet_detected = true;
            s.account = Some(account);
            s.chain_id = Some(self.config.chain_id);
        });
        log::info!("wallet connected as {}", account);
        Ok(self.snapshot())
    }

    pub async fn disconnect(&self) {
        clear_session(&self.config.session_file);
        self.notify.send_modify(|s| s.account = None);
        log::info!("wallet disconnected");
    }

    /// Switch the wallet to the expected chain, adding the network first
    /// when the wallet does not know it (code 4902).
    async fn ensure_chain(&self, wallet: &RpcClient) -> ChainResult<()> {
        let expected = self.config.chain_id;
        if wallet.chain_id().await? == expected {
            return Ok(());
        }
        let switch = json!([{ "chainId": quantity::encode_u64(expected) }]);
        match wallet.request::<Value>("wallet_switchEthereumChain", switch).await {
            Ok(_) => Ok(()),
            Err(ChainError::CallFailed { code: Some(CODE_UNKNOWN_CHAIN), .. }) => {
                log::info!("chain {} unknown to wallet, adding it", expected);
                let add = json!([self.config.add_chain_params()]);
                match wallet.request::<Value>("wallet_addEthereumChain", add).await {
                    Ok(_) => Ok(()),
                    Err(e) => {
                        log::warn!("could not add network: {}", e);
                        Err(ChainError::WrongNetwork { expected })
                    }
                }
            }
            Err(e) => {
                log::warn!("could not switch network: {}", e);
                Err(ChainError::WrongNetwork { expected })
            }
        }
    }

    /// Submit a contract write as the connected account and wait for the
    /// receipt. The gas price is fetched right before submission.
    pub async fn submit(&self, to: Address, data: Vec<u8>, gas: u64) -> ChainResult<TxReceipt> {
        let wallet = self.wallet.as_ref().ok_or(ChainError::ProviderMissing)?;
        let from = match self.account() {
            Some(account) => account,
            None => {
                return Err(ChainError::CallFailed {
                    code: None,
                    message: "No wallet connected. Connect a wallet first".to_string(),
                });
            }
        };
        let chain = wallet.chain_id().await?;
        if chain != self.config.chain_id {
            return Err(ChainError::WrongNetwork {
                expected: self.config.chain_id,
            });
        }
        let gas_price = wallet.gas_price().await?;
        let tx = TransactionRequest {
            from,
            to: Some(to),
            data: hex::encode_prefixed(&data),
            gas: Some(quantity::encode_u64(gas)),
            gas_price: Some(quantity::encode_u256(gas_price)),
        };
        wallet.send_and_confirm(&tx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_session_file(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("chainballot-session-{}-{}.json", tag, rand::random::<u32>()))
    }

    fn read_only_config(session_file: PathBuf) -> AppConfig {
        AppConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            allowed_origin: "http://localhost".to_string(),
            wallet_rpc_url: None,
            readonly_rpc_url: "http://127.0.0.1:1".to_string(),
            chain_id: 1313161894,
            chain_name: "Gyansetu AI".to_string(),
            currency_symbol: "GAI".to_string(),
            explorer_url: "http://localhost".to_string(),
            ballot_address: Address::ZERO,
            nft_address: Address::ZERO,
            session_file,
            read_concurrency: 3,
            artifacts_dir: PathBuf::from("artifacts"),
            manifest_file: PathBuf::from("deployment-info.json"),
        }
    }

    #[test]
    fn session_file_round_trip() {
        let path = temp_session_file("round-trip");
        let account: Address = "0x9a836494aCB32fb1721eCbe976C13291dd91597f".parse().unwrap();

        assert_eq!(load_session(&path), None);
        store_session(&path, account);
        assert_eq!(load_session(&path), Some(account));
        clear_session(&path);
        assert_eq!(load_session(&path), None);
    }

    #[test]
    fn corrupted_session_file_is_ignored() {
        let path = temp_session_file("corrupted");
        fs::write(&path, "not json").unwrap();
        assert_eq!(load_session(&path), None);
        clear_session(&path);
    }

    #[actix_web::test]
    async fn read_only_mode_without_wallet_endpoint() {
        let session = ChainSession::new(&read_only_config(temp_session_file("read-only")));
        session.detect().await;
        session.refresh().await;

        let snapshot = session.snapshot();
        assert!(!snapshot.wallet_detected);
        assert_eq!(snapshot.account, None);
        assert_eq!(snapshot.chain_id, None);

        match session.connect().await {
            Err(ChainError::ProviderMissing) => {}
            other => panic!("expected ProviderMissing, got {:?}", other.map(|_| ())),
        }
    }

    #[actix_web::test]
    async fn submit_requires_a_wallet() {
        let session = ChainSession::new(&read_only_config(temp_session_file("submit")));
        match session.submit(Address::ZERO, vec![], 300_000).await {
            Err(ChainError::ProviderMissing) => {}
            other => panic!("expected ProviderMissing, got {:?}", other.map(|_| ())),
        }
    }

    #[actix_web::test]
    async fn watch_subscribers_see_disconnect() {
        let session = ChainSession::new(&read_only_config(temp_session_file("watch")));
        let receiver = session.subscribe();
        session.disconnect().await;
        assert_eq!(receiver.borrow().account, None);
    }
}
