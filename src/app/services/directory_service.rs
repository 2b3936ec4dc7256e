use crate::app::chain::ballot::BallotContract;
use crate::app::config::AppConfig;
use crate::app::dtos::voting_dto::{DirectoryEntryDto, DirectoryViewDto};
use crate::app::entities::voting_entity::VotingStatus;
use crate::app::services::voting_service;
use crate::app::utils::fanout;
use actix_web::web;
use alloy_primitives::Address;
use chrono::Utc;

const NOT_DEPLOYED_MESSAGE: &str =
    "Contracts are not deployed yet. Deploy them and update the configured addresses.";
const EMPTY_DIRECTORY_MESSAGE: &str = "No votings available yet. Create the first voting!";

/// The home page listing. Every identifier resolves to a row, failed
/// ones keep their error inline so the rest of the page still renders.
pub async fn directory(
    config: web::Data<AppConfig>,
    ballot: web::Data<BallotContract>,
) -> DirectoryViewDto {
    if config.ballot_address == Address::ZERO {
        return DirectoryViewDto {
            message: Some(NOT_DEPLOYED_MESSAGE.to_string()),
            votings: vec![],
        };
    }

    // Connection test before fanning out
    if let Err(e) = ballot.voting_counter().await {
        log::warn!("ballot contract unreachable: {}", e);
        return DirectoryViewDto {
            message: Some(format!("Could not load votings: {}", e)),
            votings: vec![],
        };
    }

    let identifiers = match ballot.ongoing_votings().await {
        Ok(ids) => ids,
        Err(e) => {
            return DirectoryViewDto {
                message: Some(format!("Could not load votings: {}", e)),
                votings: vec![],
            }
        }
    };
    if identifiers.is_empty() {
        return DirectoryViewDto {
            message: Some(EMPTY_DIRECTORY_MESSAGE.to_string()),
            votings: vec![],
        };
    }

    let mut votings = fanout::bounded(identifiers, config.read_concurrency, |identifier| {
        let ballot = ballot.clone();
        async move { directory_entry(ballot, identifier).await }
    })
    .await;
    sort_ongoing_first(&mut votings);

    DirectoryViewDto {
        message: None,
        votings,
    }
}

async fn directory_entry(ballot: web::Data<BallotContract>, identifier: String) -> DirectoryEntryDto {
    match voting_service::fetch_summary(ballot, &identifier).await {
        Ok(summary) => {
            let status = summary.status_at(Utc::now());
            let link = match status {
                VotingStatus::Ended => format!("/result?id={}", summary.identifier),
                VotingStatus::Ongoing => format!("/vote?id={}", summary.identifier),
            };
            DirectoryEntryDto {
                identifier: summary.identifier,
                title: Some(summary.title),
                description: Some(summary.description),
                start_time: Some(summary.start_time),
                end_time: Some(summary.end_time),
                status: Some(status),
                link: Some(link),
                error: None,
            }
        }
        Err(e) => DirectoryEntryDto {
            identifier,
            title: None,
            description: None,
            start_time: None,
            end_time: None,
            status: None,
            link: None,
            error: Some(e.to_string()),
        },
    }
}

/// Ongoing rows first, ended rows after, relative order preserved.
pub fn sort_ongoing_first(votings: &mut [DirectoryEntryDto]) {
    votings.sort_by_key(|entry| entry.is_ended());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(identifier: &str, status: Option<VotingStatus>) -> DirectoryEntryDto {
        DirectoryEntryDto {
            identifier: identifier.to_string(),
            title: None,
            description: None,
            start_time: None,
            end_time: None,
            status,
            link: None,
            error: None,
        }
    }

    #[test]
    fn ongoing_votings_sort_before_ended_ones() {
        let mut votings = vec![
            entry("a", Some(VotingStatus::Ended)),
            entry("b", Some(VotingStatus::Ongoing)),
            entry("c", Some(VotingStatus::Ended)),
            entry("d", Some(VotingStatus::Ongoing)),
        ];
        sort_ongoing_first(&mut votings);
        let order: Vec<&str> = votings.iter().map(|v| v.identifier.as_str()).collect();
        assert_eq!(order, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn failed_rows_keep_their_position_among_ongoing_ones() {
        let mut votings = vec![
            entry("a", Some(VotingStatus::Ended)),
            entry("broken", None),
            entry("b", Some(VotingStatus::Ongoing)),
        ];
        sort_ongoing_first(&mut votings);
        let order: Vec<&str> = votings.iter().map(|v| v.identifier.as_str()).collect();
        assert_eq!(order, vec!["broken", "b", "a"]);
    }
}
