use crate::app::chain::access_nft::AccessNft;
use crate::app::chain::ballot::BallotContract;
use crate::app::chain::error::{ChainError, ChainResult};
use crate::app::chain::rpc::TxReceipt;
use crate::app::chain::session::ChainSession;
use crate::app::config::AppConfig;
use crate::app::dtos::ballot_dto::{BallotAction, BallotPanelDto, CastVoteDto, VotePageDto};
use crate::app::dtos::page_dto::Section;
use crate::app::services::voting_service;
use actix_web::web;
use alloy_primitives::Address;

const NO_CANDIDATES_MESSAGE: &str = "No candidates found for this voting.";
const ALREADY_VOTED_NOTICE: &str = "You have already voted. Only one vote allowed per user.";

/// Decision table for the ballot panel.
pub fn ballot_action(connected: bool, has_token: bool, has_voted: bool) -> BallotAction {
    if !connected {
        return BallotAction::Hidden;
    }
    if has_voted {
        return BallotAction::AlreadyVoted;
    }
    if has_token {
        return BallotAction::CastVote;
    }
    BallotAction::RequestAccess
}

/// Assemble the vote page. The three sections load concurrently and
/// fail independently.
pub async fn ballot_page(
    config: web::Data<AppConfig>,
    session: web::Data<ChainSession>,
    ballot: web::Data<BallotContract>,
    nft: web::Data<AccessNft>,
    identifier: &str,
) -> VotePageDto {
    session.refresh().await;
    let account = session.account();

    let (details, panel, holders) = futures::join!(
        voting_service::voting_detail(ballot.clone(), nft.clone(), identifier),
        ballot_panel(ballot.clone(), nft.clone(), account, identifier),
        voting_service::token_holders(config, ballot.clone(), nft, identifier),
    );

    let ballot_section = match panel {
        Ok(panel) => Section {
            data: Some(panel),
            error: None,
        },
        Err(e) => {
            log::warn!("ballot panel unavailable for {}: {}", identifier, e);
            Section {
                data: None,
                error: Some(NO_CANDIDATES_MESSAGE.to_string()),
            }
        }
    };

    VotePageDto {
        details: details.into(),
        ballot: ballot_section,
        token_holders: holders.into(),
    }
}

async fn ballot_panel(
    ballot: web::Data<BallotContract>,
    nft: web::Data<AccessNft>,
    account: Option<Address>,
    identifier: &str,
) -> ChainResult<BallotPanelDto> {
    let candidates = ballot.voting_data(identifier).await?;

    // Missing token or vote history degrade to false instead of
    // blanking the panel
    let (has_access_token, has_voted) = match account {
        Some(account) => {
            let (received, voted) = futures::join!(
                nft.has_received(identifier, account),
                ballot.has_voter_voted(identifier, account),
            );
            let received = received.unwrap_or_else(|e| {
                log::warn!("token check failed for {}: {}", account, e);
                false
            });
            let voted = voted.unwrap_or_else(|e| {
                log::warn!("voted status lookup failed for {}: {}", account, e);
                false
            });
            (received, voted)
        }
        None => (false, false),
    };

    let action = ballot_action(account.is_some(), has_access_token, has_voted);
    let notice = match action {
        BallotAction::AlreadyVoted => Some(ALREADY_VOTED_NOTICE.to_string()),
        _ => None,
    };

    Ok(BallotPanelDto {
        candidates,
        connected: account.is_some(),
        has_access_token,
        has_voted,
        action,
        notice,
    })
}

pub async fn cast_vote(
    session: web::Data<ChainSession>,
    ballot: web::Data<BallotContract>,
    vote: CastVoteDto,
) -> ChainResult<TxReceipt> {
    let tallies = ballot.voting_data(&vote.identifier).await?;
    if !tallies.iter().any(|tally| tally.name == vote.candidate) {
        return Err(ChainError::CallFailed {
            code: None,
            message: "Invalid candidate selected.".to_string(),
        });
    }

    let receipt = ballot.vote(&session, &vote.identifier, &vote.candidate).await?;
    log::info!("vote cast on {} in transaction {}", vote.identifier, receipt.transaction_hash);
    Ok(receipt)
}

pub async fn request_access(
    session: web::Data<ChainSession>,
    nft: web::Data<AccessNft>,
    identifier: &str,
) -> ChainResult<TxReceipt> {
    let receipt = nft.register_user(&session, identifier).await?;
    log::info!("access requested for {} in transaction {}", identifier, receipt.transaction_hash);
    Ok(receipt)
}
