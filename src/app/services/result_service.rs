use crate::app::chain::access_nft::AccessNft;
use crate::app::chain::ballot::BallotContract;
use crate::app::chain::error::{ChainError, ChainResult};
use crate::app::config::AppConfig;
use crate::app::dtos::result_dto::{CandidateResultDto, OutcomeDto, ResultPageDto};
use crate::app::entities::voting_entity::{CandidateTally, Outcome};
use crate::app::services::voting_service;
use actix_web::web;

/// A unique non-zero maximum wins. A shared or all-zero maximum is a
/// tie, an empty ballot has no outcome.
pub fn decide_outcome(tallies: &[CandidateTally]) -> Outcome {
    if tallies.is_empty() {
        return Outcome::NoCandidates;
    }

    let mut best = 0;
    let mut top = tallies[0].votes;
    let mut shared = 1;
    for (index, tally) in tallies.iter().enumerate().skip(1) {
        if tally.votes > top {
            best = index;
            top = tally.votes;
            shared = 1;
        } else if tally.votes == top {
            shared += 1;
        }
    }

    if top == 0 || shared > 1 {
        Outcome::Tie
    } else {
        Outcome::Winner(best)
    }
}

pub fn outcome_dto(outcome: &Outcome, tallies: &[CandidateTally]) -> OutcomeDto {
    let icon = outcome.icon().map(str::to_string);
    match outcome {
        Outcome::NoCandidates => OutcomeDto {
            kind: "noCandidates".to_string(),
            icon,
            label: "No winner (no candidates)".to_string(),
        },
        Outcome::Tie => OutcomeDto {
            kind: "tie".to_string(),
            icon,
            label: "Tie (No winner)".to_string(),
        },
        Outcome::Winner(index) => OutcomeDto {
            kind: "winner".to_string(),
            icon,
            label: tallies
                .get(*index)
                .map(|tally| format!("{} with {} votes!", tally.name, tally.votes))
                .unwrap_or_default(),
        },
    }
}

/// Assemble the result page. The tally is the primary read, without it
/// there is nothing to show and the voting counts as missing.
pub async fn result_page(
    config: web::Data<AppConfig>,
    ballot: web::Data<BallotContract>,
    nft: web::Data<AccessNft>,
    identifier: &str,
) -> ChainResult<ResultPageDto> {
    let tallies = match ballot.voting_data(identifier).await {
        Ok(tallies) => tallies,
        Err(e) => {
            log::warn!("tally read failed for {}: {}", identifier, e);
            return Err(ChainError::NotFound(identifier.to_string()));
        }
    };

    let outcome = decide_outcome(&tallies);
    let winner_index = match outcome {
        Outcome::Winner(index) => Some(index),
        _ => None,
    };
    let candidates: Vec<CandidateResultDto> = tallies
        .iter()
        .enumerate()
        .map(|(index, tally)| CandidateResultDto {
            name: tally.name.clone(),
            votes: tally.votes,
            winner: winner_index == Some(index),
        })
        .collect();

    let (details, holders) = futures::join!(
        voting_service::voting_detail(ballot.clone(), nft.clone(), identifier),
        voting_service::token_holders(config, ballot, nft, identifier),
    );

    Ok(ResultPageDto {
        outcome: outcome_dto(&outcome, &tallies),
        candidates,
        details: details.into(),
        token_holders: holders.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tallies(counts: &[(&str, u64)]) -> Vec<CandidateTally> {
        counts
            .iter()
            .map(|(name, votes)| CandidateTally {
                name: name.to_string(),
                votes: *votes,
            })
            .collect()
    }

    #[test]
    fn a_unique_maximum_wins() {
        let outcome = decide_outcome(&tallies(&[("Alice", 3), ("Bob", 5), ("Carol", 2)]));
        assert_eq!(outcome, Outcome::Winner(1));
    }

    #[test]
    fn a_shared_maximum_is_a_tie() {
        let outcome = decide_outcome(&tallies(&[("Alice", 4), ("Bob", 4), ("Carol", 1)]));
        assert_eq!(outcome, Outcome::Tie);
    }

    #[test]
    fn no_votes_at_all_is_a_tie() {
        assert_eq!(decide_outcome(&tallies(&[("Alice", 0), ("Bob", 0)])), Outcome::Tie);
        // Even a single candidate needs at least one vote to win
        assert_eq!(decide_outcome(&tallies(&[("Alice", 0)])), Outcome::Tie);
    }

    #[test]
    fn a_single_voted_candidate_wins() {
        assert_eq!(decide_outcome(&tallies(&[("Alice", 1)])), Outcome::Winner(0));
    }

    #[test]
    fn an_empty_ballot_has_no_outcome() {
        assert_eq!(decide_outcome(&[]), Outcome::NoCandidates);
    }

    #[test]
    fn outcome_labels_and_icons() {
        let voted = tallies(&[("Alice", 2), ("Bob", 1)]);
        let winner = outcome_dto(&Outcome::Winner(0), &voted);
        assert_eq!(winner.kind, "winner");
        assert_eq!(winner.icon.as_deref(), Some("crown"));
        assert_eq!(winner.label, "Alice with 2 votes!");

        let tie = outcome_dto(&Outcome::Tie, &voted);
        assert_eq!(tie.kind, "tie");
        assert_eq!(tie.icon.as_deref(), Some("balance"));
        assert_eq!(tie.label, "Tie (No winner)");

        let empty = outcome_dto(&Outcome::NoCandidates, &[]);
        assert_eq!(empty.kind, "noCandidates");
        assert_eq!(empty.icon, None);
        assert_eq!(empty.label, "No winner (no candidates)");
    }
}
