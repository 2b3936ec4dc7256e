use alloy_primitives::hex;
use alloy_sol_types::{Revert, SolError};
use serde_json::Value;

// Custom error type covering every way a wallet or contract interaction can fail
#[derive(Debug)]
pub enum ChainError {
    ProviderMissing,
    WrongNetwork { expected: u64 },
    UserRejected(String),
    CallFailed { code: Option<i64>, message: String },
    NotFound(String),
}

impl std::fmt::Display for ChainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChainError::ProviderMissing => {
                write!(f, "No wallet endpoint available. Running in read-only mode")
            }
            ChainError::WrongNetwork { expected } => {
                write!(f, "Wallet is on the wrong network, expected chain id {}", expected)
            }
            ChainError::UserRejected(msg) => {
                write!(f, "Transaction was rejected by user: {}", msg)
            }
            ChainError::CallFailed { message, .. } => {
                write!(f, "Contract call failed: {}", message)
            }
            ChainError::NotFound(identifier) => {
                write!(f, "Voting not found for identifier: {}", identifier)
            }
        }
    }
}

impl std::error::Error for ChainError {}

pub type ChainResult<T> = Result<T, ChainError>;

/// Pull the human readable reason out of standard `Error(string)` revert
/// data. Nodes put the hex blob either directly in the error `data` field
/// or one level down under a nested `data` key.
pub fn revert_reason(data: Option<&Value>) -> Option<String> {
    let blob = match data? {
        Value::String(s) => s.clone(),
        Value::Object(map) => match map.get("data") {
            Some(Value::String(s)) => s.clone(),
            _ => return None,
        },
        _ => return None,
    };
    let bytes = hex::decode(blob.trim()).ok()?;
    Revert::abi_decode(&bytes, false).ok().map(|r| r.reason)
}
