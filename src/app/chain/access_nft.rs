use crate::app::chain::error::{ChainError, ChainResult};
use crate::app::chain::rpc::{RpcClient, TxReceipt};
use crate::app::chain::session::ChainSession;
use alloy_primitives::Address;
use alloy_sol_types::{sol, SolCall};
use std::sync::Arc;

pub const GAS_REGISTER_USER: u64 = 300_000;
pub const GAS_MINT: u64 = 200_000;
pub const GAS_BATCH_MINT: u64 = 500_000;

sol! {
    function getUsersWithNFTs(string identifier) external view returns (address[]);
    function hasReceived(string identifier, address user) external view returns (bool);
    function identifierToOwner(string identifier) external view returns (address);
    function getContractOwner() external view returns (address);
    function balanceOf(address owner) external view returns (uint256);

    function registerUser(string identifier) external;
    function mintNFT(address recipient) external;
    function batchMintNFTs(address[] recipients) external;
}

/// Typed proxy for the VotingPowerNFT access contract.
pub struct AccessNft {
    address: Address,
    rpc: Arc<RpcClient>,
}

impl AccessNft {
    pub fn new(address: Address, rpc: Arc<RpcClient>) -> AccessNft {
        AccessNft { address, rpc }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    async fn read<C: SolCall>(&self, call: C) -> ChainResult<C::Return> {
        let output = self.rpc.call(self.address, call.abi_encode()).await?;
        if output.is_empty() {
            return Err(ChainError::CallFailed {
                code: None,
                message: format!("Empty response from {}, contract not deployed at this address?", self.address),
            });
        }
        C::abi_decode_returns(&output, true).map_err(|e| ChainError::CallFailed {
            code: None,
            message: format!("Could not decode contract response: {}", e),
        })
    }

    pub async fn users_with_nfts(&self, identifier: &str) -> ChainResult<Vec<Address>> {
        let ret = self
            .read(getUsersWithNFTsCall { identifier: identifier.to_string() })
            .await?;
        Ok(ret._0)
    }

    pub async fn has_received(&self, identifier: &str, user: Address) -> ChainResult<bool> {
        let ret = self
            .read(hasReceivedCall {
                identifier: identifier.to_string(),
                user,
            })
            .await?;
        Ok(ret._0)
    }

    pub async fn identifier_to_owner(&self, identifier: &str) -> ChainResult<Address> {
        let ret = self
            .read(identifierToOwnerCall { identifier: identifier.to_string() })
            .await?;
        Ok(ret._0)
    }

    pub async fn contract_owner(&self) -> ChainResult<Address> {
        let ret = self.read(getContractOwnerCall {}).await?;
        Ok(ret._0)
    }

    pub async fn balance_of(&self, owner: Address) -> ChainResult<u64> {
        let ret = self.read(balanceOfCall { owner }).await?;
        Ok(u64::try_from(ret._0).unwrap_or(u64::MAX))
    }

    pub async fn register_user(&self, session: &ChainSession, identifier: &str) -> ChainResult<TxReceipt> {
        let data = registerUserCall {
            identifier: identifier.to_string(),
        }
        .abi_encode();
        session.submit(self.address, data, GAS_REGISTER_USER).await
    }

    pub async fn mint(&self, session: &ChainSession, recipient: Address) -> ChainResult<TxReceipt> {
        let data = mintNFTCall { recipient }.abi_encode();
        session.submit(self.address, data, GAS_MINT).await
    }

    pub async fn batch_mint(&self, session: &ChainSession, recipients: Vec<Address>) -> ChainResult<TxReceipt> {
        let data = batchMintNFTsCall { recipients }.abi_encode();
        session.submit(self.address, data, GAS_BATCH_MINT).await
    }

    /// Call data for a single mint, used by the deployment binary which
    /// submits through its own node connection instead of a session.
    pub fn mint_call_data(recipient: Address) -> Vec<u8> {
        mintNFTCall { recipient }.abi_encode()
    }
}
