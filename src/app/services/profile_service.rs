use crate::app::chain::access_nft::AccessNft;
use crate::app::chain::ballot::BallotContract;
use crate::app::chain::error::ChainResult;
use crate::app::chain::rpc::TxReceipt;
use crate::app::chain::session::ChainSession;
use crate::app::config::AppConfig;
use crate::app::dtos::profile_dto::{ProfileEntryDto, ProfilePageDto};
use crate::app::entities::voting_entity::VotingStatus;
use crate::app::services::voting_service;
use crate::app::utils::fanout;
use actix_web::web;
use alloy_primitives::Address;
use chrono::Utc;

const DEGRADED_MESSAGE: &str = "Ownership lookup unavailable, showing all ongoing votings.";
const NO_OWNED_MESSAGE: &str = "You have not created any votings yet.";

/// Votings owned by the connected account. When ownership cannot be
/// resolved the page lists every ongoing voting instead of nothing.
pub async fn profile_page(
    config: web::Data<AppConfig>,
    ballot: web::Data<BallotContract>,
    nft: web::Data<AccessNft>,
    account: Address,
) -> ProfilePageDto {
    let identifiers = match ballot.ongoing_votings().await {
        Ok(identifiers) => identifiers,
        Err(e) => {
            log::warn!("voting list unavailable: {}", e);
            return ProfilePageDto {
                account,
                degraded: false,
                message: Some(format!("Could not load votings: {}", e)),
                votings: vec![],
            };
        }
    };

    let lookups = fanout::bounded(identifiers.clone(), config.read_concurrency, |identifier| {
        let nft = nft.clone();
        async move {
            let owner = nft.identifier_to_owner(&identifier).await;
            (identifier, owner)
        }
    })
    .await;

    let mut owned = Vec::new();
    let mut degraded = false;
    for (identifier, owner) in lookups {
        match owner {
            Ok(owner) if owner == account => owned.push(identifier),
            Ok(_) => {}
            Err(e) => {
                log::warn!("ownership lookup failed for {}: {}", identifier, e);
                degraded = true;
            }
        }
    }
    if degraded {
        owned = identifiers;
    }

    let summaries = fanout::bounded(owned, config.read_concurrency, |identifier| {
        let ballot = ballot.clone();
        async move {
            match voting_service::fetch_summary(ballot, &identifier).await {
                Ok(summary) => Some(summary),
                Err(e) => {
                    log::warn!("summary fetch failed for {}: {}", identifier, e);
                    None
                }
            }
        }
    })
    .await;

    let now = Utc::now();
    let mut votings = Vec::new();
    for summary in summaries.into_iter().flatten() {
        let status = summary.status_at(now);
        let link = match status {
            VotingStatus::Ended => format!("/result?id={}", summary.identifier),
            VotingStatus::Ongoing => format!("/vote-edit?id={}", summary.identifier),
        };
        votings.push(ProfileEntryDto {
            identifier: summary.identifier,
            title: summary.title,
            description: summary.description,
            start_time: summary.start_time,
            end_time: summary.end_time,
            status,
            link,
        });
    }

    let message = if degraded {
        Some(DEGRADED_MESSAGE.to_string())
    } else if votings.is_empty() {
        Some(NO_OWNED_MESSAGE.to_string())
    } else {
        None
    };

    ProfilePageDto {
        account,
        degraded,
        message,
        votings,
    }
}

pub async fn mint_access(
    session: web::Data<ChainSession>,
    nft: web::Data<AccessNft>,
    recipient: Address,
) -> ChainResult<TxReceipt> {
    let receipt = nft.mint(&session, recipient).await?;
    log::info!("access token minted for {} in transaction {}", recipient, receipt.transaction_hash);
    Ok(receipt)
}

pub async fn batch_mint_access(
    session: web::Data<ChainSession>,
    nft: web::Data<AccessNft>,
    recipients: Vec<Address>,
) -> ChainResult<TxReceipt> {
    let count = recipients.len();
    let receipt = nft.batch_mint(&session, recipients).await?;
    log::info!("batch minted {} access tokens in transaction {}", count, receipt.transaction_hash);
    Ok(receipt)
}
