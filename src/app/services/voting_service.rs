use crate::app::chain::access_nft::AccessNft;
use crate::app::chain::ballot::BallotContract;
use crate::app::chain::error::{ChainError, ChainResult};
use crate::app::chain::rpc::TxReceipt;
use crate::app::chain::session::ChainSession;
use crate::app::config::AppConfig;
use crate::app::dtos::voting_dto::{AccessRecordDto, CreateVotingDto, EditPageDto, VotingDetailDto};
use crate::app::entities::voting_entity::{datetime_from_epoch, TokenHolder, VotingSummary};
use crate::app::utils::fanout;
use actix_web::web;
use alloy_primitives::Address;
use chrono::{DateTime, Utc};

/// Read the full on-chain summary of one voting. Details and both dates
/// are fetched concurrently, an all-default response means the
/// identifier does not exist.
pub async fn fetch_summary(
    ballot: web::Data<BallotContract>,
    identifier: &str,
) -> ChainResult<VotingSummary> {
    let (details, start, end) = futures::try_join!(
        ballot.voting_details(identifier),
        ballot.start_date(identifier),
        ballot.end_date(identifier),
    )?;
    let (title, description, nft_contract) = details;
    if title.is_empty() && nft_contract == Address::ZERO && start == 0 && end == 0 {
        return Err(ChainError::NotFound(identifier.to_string()));
    }
    let start_time = datetime_from_epoch(start).ok_or_else(|| ChainError::CallFailed {
        code: None,
        message: format!("start date out of range: {}", start),
    })?;
    let end_time = datetime_from_epoch(end).ok_or_else(|| ChainError::CallFailed {
        code: None,
        message: format!("end date out of range: {}", end),
    })?;
    Ok(VotingSummary {
        identifier: identifier.to_string(),
        title,
        description,
        nft_contract,
        start_time,
        end_time,
    })
}

/// Details section shared by the vote, result and edit pages. The
/// creator lookup degrades to an anonymous listing when unavailable.
pub async fn voting_detail(
    ballot: web::Data<BallotContract>,
    nft: web::Data<AccessNft>,
    identifier: &str,
) -> ChainResult<VotingDetailDto> {
    let summary = fetch_summary(ballot, identifier).await?;
    let creator = match nft.identifier_to_owner(identifier).await {
        Ok(owner) if owner != Address::ZERO => Some(owner),
        Ok(_) => None,
        Err(e) => {
            log::warn!("creator lookup failed for {}: {}", identifier, e);
            None
        }
    };
    let status = summary.status_at(Utc::now());
    Ok(VotingDetailDto {
        identifier: summary.identifier,
        title: summary.title,
        description: summary.description,
        nft_contract: summary.nft_contract,
        creator,
        start_time: summary.start_time,
        end_time: summary.end_time,
        status,
    })
}

/// Token holder section shared by the vote, result and edit pages.
pub async fn token_holders(
    config: web::Data<AppConfig>,
    ballot: web::Data<BallotContract>,
    nft: web::Data<AccessNft>,
    identifier: &str,
) -> ChainResult<Vec<TokenHolder>> {
    let owners = nft.users_with_nfts(identifier).await?;
    let holders = fanout::bounded(owners, config.read_concurrency, |address| {
        let ballot = ballot.clone();
        async move {
            let has_voted = match ballot.has_voter_voted(identifier, address).await {
                Ok(voted) => voted,
                Err(e) => {
                    log::warn!("voted status lookup failed for {}: {}", address, e);
                    false
                }
            };
            TokenHolder { address, has_voted }
        }
    })
    .await;
    Ok(holders)
}

pub fn validate_voting_times(
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> ChainResult<()> {
    let current_time = Utc::now();

    if start_time >= end_time {
        return Err(ChainError::CallFailed {
            code: None,
            message: "End time must be after the start time".to_string(),
        });
    }

    if start_time <= current_time {
        return Err(ChainError::CallFailed {
            code: None,
            message: "Start time must be in the future".to_string(),
        });
    }

    Ok(())
}

/// Random identifier probed for uniqueness against the contract.
async fn generate_identifier(ballot: &web::Data<BallotContract>) -> ChainResult<String> {
    loop {
        let candidate = format!("voting-{:08x}", rand::random::<u32>());
        match ballot.start_date(&candidate).await {
            Ok(0) => return Ok(candidate),
            Ok(_) => log::info!("identifier {} already in use, retrying", candidate),
            Err(e) => {
                log::warn!("uniqueness probe failed for {}: {}", candidate, e);
                return Ok(candidate);
            }
        }
    }
}

pub async fn create_voting(
    config: web::Data<AppConfig>,
    session: web::Data<ChainSession>,
    ballot: web::Data<BallotContract>,
    voting: CreateVotingDto,
) -> ChainResult<(String, TxReceipt)> {
    validate_voting_times(voting.start_time, voting.end_time)?;

    let identifier = match &voting.identifier {
        Some(id) if !id.trim().is_empty() => id.trim().to_string(),
        _ => generate_identifier(&ballot).await?,
    };
    let candidates: Vec<String> = voting
        .candidates
        .iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    let nft_contract = voting.nft_contract.unwrap_or(config.nft_address);
    let start = u64::try_from(voting.start_time.timestamp()).unwrap_or_default();
    let end = u64::try_from(voting.end_time.timestamp()).unwrap_or_default();

    let receipt = ballot
        .create_voting(
            &session,
            &identifier,
            &voting.title,
            &voting.description,
            start,
            end,
            nft_contract,
            candidates,
        )
        .await?;
    log::info!("voting {} created in transaction {}", identifier, receipt.transaction_hash);
    Ok((identifier, receipt))
}

pub async fn add_candidate(
    session: web::Data<ChainSession>,
    ballot: web::Data<BallotContract>,
    identifier: &str,
    candidate: &str,
) -> ChainResult<TxReceipt> {
    let receipt = ballot.add_candidate(&session, identifier, candidate).await?;
    log::info!("candidate {:?} added to {} in transaction {}", candidate, identifier, receipt.transaction_hash);
    Ok(receipt)
}

pub async fn delete_candidate(
    session: web::Data<ChainSession>,
    ballot: web::Data<BallotContract>,
    identifier: &str,
    candidate: &str,
) -> ChainResult<TxReceipt> {
    let receipt = ballot.delete_candidate(&session, identifier, candidate).await?;
    log::info!("candidate {:?} removed from {} in transaction {}", candidate, identifier, receipt.transaction_hash);
    Ok(receipt)
}

pub async fn delete_voting(
    session: web::Data<ChainSession>,
    ballot: web::Data<BallotContract>,
    identifier: &str,
) -> ChainResult<TxReceipt> {
    let receipt = ballot.delete_voting(&session, identifier).await?;
    log::info!("voting {} deleted in transaction {}", identifier, receipt.transaction_hash);
    Ok(receipt)
}

/// Users recorded on the access contract together with whether the
/// token already reached them, the management page mints for the rest.
async fn access_records(
    config: web::Data<AppConfig>,
    nft: web::Data<AccessNft>,
    identifier: &str,
) -> ChainResult<Vec<AccessRecordDto>> {
    let users = nft.users_with_nfts(identifier).await?;
    let records = fanout::bounded(users, config.read_concurrency, |address| {
        let nft = nft.clone();
        async move {
            let has_received = match nft.has_received(identifier, address).await {
                Ok(received) => received,
                Err(e) => {
                    log::warn!("token check failed for {}: {}", address, e);
                    false
                }
            };
            AccessRecordDto {
                address,
                has_received,
            }
        }
    })
    .await;
    Ok(records)
}

pub async fn edit_page(
    config: web::Data<AppConfig>,
    session: web::Data<ChainSession>,
    ballot: web::Data<BallotContract>,
    nft: web::Data<AccessNft>,
    identifier: &str,
) -> EditPageDto {
    session.refresh().await;
    let account = session.account();

    let (details, tallies, requests, holders, owner) = futures::join!(
        voting_detail(ballot.clone(), nft.clone(), identifier),
        ballot.voting_data(identifier),
        access_records(config.clone(), nft.clone(), identifier),
        token_holders(config, ballot.clone(), nft.clone(), identifier),
        nft.identifier_to_owner(identifier),
    );

    let is_owner = match (account, &owner) {
        (Some(account), Ok(owner)) => *owner != Address::ZERO && *owner == account,
        _ => false,
    };

    EditPageDto {
        details: details.into(),
        candidates: tallies.into(),
        access_requests: requests.into(),
        token_holders: holders.into(),
        is_owner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn accepts_a_future_window() {
        let start = Utc::now() + Duration::hours(1);
        let end = start + Duration::hours(24);
        assert!(validate_voting_times(start, end).is_ok());
    }

    #[test]
    fn rejects_an_inverted_window() {
        let start = Utc::now() + Duration::hours(2);
        let end = Utc::now() + Duration::hours(1);
        match validate_voting_times(start, end) {
            Err(ChainError::CallFailed { message, .. }) => {
                assert_eq!(message, "End time must be after the start time");
            }
            other => panic!("expected CallFailed, got {:?}", other),
        }
    }

    #[test]
    fn rejects_a_start_in_the_past() {
        let start = Utc::now() - Duration::hours(1);
        let end = Utc::now() + Duration::hours(1);
        match validate_voting_times(start, end) {
            Err(ChainError::CallFailed { message, .. }) => {
                assert_eq!(message, "Start time must be in the future");
            }
            other => panic!("expected CallFailed, got {:?}", other),
        }
    }
}
