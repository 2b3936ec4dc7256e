use crate::app::chain::error::{revert_reason, ChainError, ChainResult};
use crate::app::utils::quantity;
use alloy_primitives::{hex, Address, B256, U256};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);

// EIP-1193 user rejection
const CODE_USER_REJECTED: i64 = 4001;

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
    data: Option<Value>,
}

impl RpcErrorObject {
    fn into_chain_error(self) -> ChainError {
        if self.code == CODE_USER_REJECTED {
            return ChainError::UserRejected(self.message);
        }
        let message = match revert_reason(self.data.as_ref()) {
            Some(reason) => reason,
            None => self.message,
        };
        ChainError::CallFailed {
            code: Some(self.code),
            message,
        }
    }
}

/// Transaction in the shape `eth_sendTransaction` expects. Fields left as
/// `None` are filled in by the node (gas estimation, current gas price,
/// contract creation when `to` is absent).
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRequest {
    pub from: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<String>,
    #[serde(rename = "gasPrice")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TxReceipt {
    #[serde(rename = "transactionHash")]
    pub transaction_hash: B256,

    #[serde(rename = "status")]
    pub status: Option<String>,

    #[serde(rename = "contractAddress")]
    pub contract_address: Option<Address>,

    #[serde(rename = "blockNumber")]
    pub block_number: Option<String>,

    #[serde(rename = "gasUsed")]
    pub gas_used: Option<String>,
}

impl TxReceipt {
    /// Pre-Byzantium nodes omit the status field, treat that as success.
    pub fn succeeded(&self) -> bool {
        matches!(self.status.as_deref(), None | Some("0x1"))
    }
}

pub struct RpcClient {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(url: &str) -> RpcClient {
        RpcClient {
            http: reqwest::Client::new(),
            url: url.to_string(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn request<T: DeserializeOwned>(&self, method: &str, params: Value) -> ChainResult<T> {
        let payload = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        let response = match self.http.post(&self.url).json(&payload).send().await {
            Ok(response) => response,
            Err(e) => {
                return Err(ChainError::CallFailed {
                    code: None,
                    message: format!("{} request failed: {}", method, e),
                });
            }
        };
        let status = response.status();
        let body: RpcResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                return Err(ChainError::CallFailed {
                    code: None,
                    message: format!("{} returned {}: {}", method, status, e),
                });
            }
        };
        if let Some(error) = body.error {
            return Err(error.into_chain_error());
        }
        let result = body.result.unwrap_or(Value::Null);
        serde_json::from_value(result).map_err(|e| ChainError::CallFailed {
            code: None,
            message: format!("invalid {} response: {}", method, e),
        })
    }

    pub async fn chain_id(&self) -> ChainResult<u64> {
        let raw: String = self.request("eth_chainId", json!([])).await?;
        quantity::parse_u64(&raw)
    }

    pub async fn accounts(&self) -> ChainResult<Vec<Address>> {
        self.request("eth_accounts", json!([])).await
    }

    /// Prompting variant of `accounts`, the wallet may ask the user.
    pub async fn request_accounts(&self) -> ChainResult<Vec<Address>> {
        self.request("eth_requestAccounts", json!([])).await
    }

    pub async fn gas_price(&self) -> ChainResult<U256> {
        let raw: String = self.request("eth_gasPrice", json!([])).await?;
        quantity::parse_u256(&raw)
    }

    pub async fn call(&self, to: Address, data: Vec<u8>) -> ChainResult<Vec<u8>> {
        let params = json!([{ "to": to, "data": hex::encode_prefixed(&data) }, "latest"]);
        let raw: String = self.request("eth_call", params).await?;
        hex::decode(raw.trim()).map_err(|e| ChainError::CallFailed {
            code: None,
            message: format!("eth_call returned invalid hex: {}", e),
        })
    }

    pub async fn send_transaction(&self, tx: &TransactionRequest) -> ChainResult<B256> {
        self.request("eth_sendTransaction", json!([tx])).await
    }

    pub async fn transaction_receipt(&self, hash: B256) -> ChainResult<Option<TxReceipt>> {
        self.request("eth_getTransactionReceipt", json!([hash])).await
    }

    /// Submit and poll until the transaction is mined. A receipt with
    /// status 0 means the transaction reverted on-chain.
    pub async fn send_and_confirm(&self, tx: &TransactionRequest) -> ChainResult<TxReceipt> {
        let hash = self.send_transaction(tx).await?;
        log::info!("transaction {} submitted, waiting for receipt", hash);
        loop {
            if let Some(receipt) = self.transaction_receipt(hash).await? {
                if !receipt.succeeded() {
                    return Err(ChainError::CallFailed {
                        code: None,
                        message: format!("transaction {} reverted", receipt.transaction_hash),
                    });
                }
                return Ok(receipt);
            }
            tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_status_interpretation() {
        let mined = TxReceipt {
            transaction_hash: B256::ZERO,
            status: Some("0x1".to_string()),
            contract_address: None,
            block_number: Some("0x10".to_string()),
            gas_used: None,
        };
        assert!(mined.succeeded());

        let reverted = TxReceipt {
            status: Some("0x0".to_string()),
            ..mined.clone()
        };
        assert!(!reverted.succeeded());

        let legacy = TxReceipt {
            status: None,
            ..mined
        };
        assert!(legacy.succeeded());
    }

    #[test]
    fn user_rejection_maps_to_its_own_variant() {
        let error = RpcErrorObject {
            code: CODE_USER_REJECTED,
            message: "User denied transaction signature".to_string(),
            data: None,
        };
        match error.into_chain_error() {
            ChainError::UserRejected(msg) => {
                assert!(msg.contains("User denied"));
            }
            other => panic!("expected UserRejected, got {:?}", other),
        }
    }

    #[test]
    fn revert_data_wins_over_the_generic_message() {
        let blob = concat!(
            "0x08c379a0",
            "0000000000000000000000000000000000000000000000000000000000000020",
            "000000000000000000000000000000000000000000000000000000000000000d",
            "416c726561647920766f74656400000000000000000000000000000000000000",
        );
        let error = RpcErrorObject {
            code: 3,
            message: "execution reverted".to_string(),
            data: Some(serde_json::json!(blob)),
        };
        match error.into_chain_error() {
            ChainError::CallFailed { code, message } => {
                assert_eq!(code, Some(3));
                assert_eq!(message, "Already voted");
            }
            other => panic!("expected CallFailed, got {:?}", other),
        }
    }

    #[test]
    fn transaction_request_serializes_in_wallet_shape() {
        let tx = TransactionRequest {
            from: Address::ZERO,
            to: None,
            data: "0x6080".to_string(),
            gas: Some("0x493e0".to_string()),
            gas_price: None,
        };
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["gas"], "0x493e0");
        assert!(value.get("to").is_none());
        assert!(value.get("gasPrice").is_none());
    }
}
