use crate::app::chain::error::{ChainError, ChainResult};
use crate::app::chain::rpc::{RpcClient, TxReceipt};
use crate::app::chain::session::ChainSession;
use crate::app::entities::voting_entity::CandidateTally;
use alloy_primitives::{Address, U256};
use alloy_sol_types::{sol, SolCall};
use std::sync::Arc;

pub const GAS_CREATE_VOTING: u64 = 5_000_000;
pub const GAS_VOTE: u64 = 300_000;
pub const GAS_ADD_CANDIDATE: u64 = 300_000;
pub const GAS_DELETE_CANDIDATE: u64 = 300_000;
pub const GAS_DELETE_VOTING: u64 = 300_000;

sol! {
    function votingCounter() external view returns (uint256);
    function getOngoingVotings() external view returns (string[]);
    function getVotingDetails(string identifier) external view returns (string title, string description, address nftContract);
    function getVotingData(string identifier) external view returns (string[] candidates, uint256[] votesCount);
    function getStartDate(string identifier) external view returns (uint256);
    function getEndDate(string identifier) external view returns (uint256);
    function hasVoterVoted(string identifier, address voter) external view returns (bool);

    function createVoting(string identifier, string title, string description, uint256 startTime, uint256 endTime, address nftContract, string[] initialCandidates) external;
    function vote(string identifier, string candidate) external;
    function addCandidate(string identifier, string candidate) external;
    function deleteCandidate(string identifier, string candidate) external;
    function deleteVoting(string identifier) external;
}

/// Typed proxy for the deployed ChainBallot contract. Reads go through
/// the shared read-only client, writes through the wallet session.
pub struct BallotContract {
    address: Address,
    rpc: Arc<RpcClient>,
}

impl BallotContract {
    pub fn new(address: Address, rpc: Arc<RpcClient>) -> BallotContract {
        BallotContract { address, rpc }
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

    pub async fn voting_counter(&self) -> ChainResult<u64> {
        let ret = self.read(votingCounterCall {}).await?;
        Ok(u64::try_from(ret._0).unwrap_or(u64::MAX))
    }

    pub async fn ongoing_votings(&self) -> ChainResult<Vec<String>> {
        let ret = self.read(getOngoingVotingsCall {}).await?;
        Ok(ret._0)
    }

    pub async fn voting_details(&self, identifier: &str) -> ChainResult<(String, String, Address)> {
        let ret = self
            .read(getVotingDetailsCall { identifier: identifier.to_string() })
            .await?;
        Ok((ret.title, ret.description, ret.nftContract))
    }

    pub async fn voting_data(&self, identifier: &str) -> ChainResult<Vec<CandidateTally>> {
        let ret = self
            .read(getVotingDataCall { identifier: identifier.to_string() })
            .await?;
        let tallies = ret
            .candidates
            .into_iter()
            .zip(ret.votesCount)
            .map(|(name, votes)| CandidateTally {
                name,
                votes: u64::try_from(votes).unwrap_or(u64::MAX),
            })
            .collect();
        Ok(tallies)
    }

    pub async fn start_date(&self, identifier: &str) -> ChainResult<u64> {
        let ret = self
            .read(getStartDateCall { identifier: identifier.to_string() })
            .await?;
        Ok(u64::try_from(ret._0).unwrap_or(u64::MAX))
    }

    pub async fn end_date(&self, identifier: &str) -> ChainResult<u64> {
        let ret = self
            .read(getEndDateCall { identifier: identifier.to_string() })
            .await?;
        Ok(u64::try_from(ret._0).unwrap_or(u64::MAX))
    }

    pub async fn has_voter_voted(&self, identifier: &str, voter: Address) -> ChainResult<bool> {
        let ret = self
            .read(hasVoterVotedCall {
                identifier: identifier.to_string(),
                voter,
            })
            .await?;
        Ok(ret._0)
    }

    pub async fn create_voting(
        &self,
        session: &ChainSession,
        identifier: &str,
        title: &str,
        description: &str,
        start_time: u64,
        end_time: u64,
        nft_contract: Address,
        initial_candidates: Vec<String>,
    ) -> ChainResult<TxReceipt> {
        let data = createVotingCall {
            identifier: identifier.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            startTime: U256::from(start_time),
            endTime: U256::from(end_time),
            nftContract: nft_contract,
            initialCandidates: initial_candidates,
        }
        .abi_encode();
        session.submit(self.address, data, GAS_CREATE_VOTING).await
    }

    pub async fn vote(&self, session: &ChainSession, identifier: &str, candidate: &str) -> ChainResult<TxReceipt> {
        let data = voteCall {
            identifier: identifier.to_string(),
            candidate: candidate.to_string(),
        }
        .abi_encode();
        session.submit(self.address, data, GAS_VOTE).await
    }

    pub async fn add_candidate(&self, session: &ChainSession, identifier: &str, candidate: &str) -> ChainResult<TxReceipt> {
        let data = addCandidateCall {
            identifier: identifier.to_string(),
            candidate: candidate.to_string(),
        }
        .abi_encode();
        session.submit(self.address, data, GAS_ADD_CANDIDATE).await
    }

    pub async fn delete_candidate(&self, session: &ChainSession, identifier: &str, candidate: &str) -> ChainResult<TxReceipt> {
        let data = deleteCandidateCall {
            identifier: identifier.to_string(),
            candidate: candidate.to_string(),
        }
        .abi_encode();
        session.submit(self.address, data, GAS_DELETE_CANDIDATE).await
    }

    pub async fn delete_voting(&self, session: &ChainSession, identifier: &str) -> ChainResult<TxReceipt> {
        let data = deleteVotingCall {
            identifier: identifier.to_string(),
        }
        .abi_encode();
        session.submit(self.address, data, GAS_DELETE_VOTING).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_call_data_starts_with_the_selector() {
        let data = voteCall {
            identifier: "election-1".to_string(),
            candidate: "Alice".to_string(),
        }
        .abi_encode();
        assert_eq!(&data[..4], voteCall::SELECTOR);
        assert!(data.len() > 4);
    }

    #[test]
    fn create_voting_encodes_all_arguments() {
        let data = createVotingCall {
            identifier: "election-1".to_string(),
            title: "Board election".to_string(),
            description: "Annual board".to_string(),
            startTime: U256::from(1_700_000_000u64),
            endTime: U256::from(1_700_086_400u64),
            nftContract: Address::ZERO,
            initialCandidates: vec!["Alice".to_string(), "Bob".to_string()],
        }
        .abi_encode();
        let decoded = createVotingCall::abi_decode(&data, true).unwrap();
        assert_eq!(decoded.identifier, "election-1");
        assert_eq!(decoded.initialCandidates.len(), 2);
        assert_eq!(decoded.endTime, U256::from(1_700_086_400u64));
    }
}
