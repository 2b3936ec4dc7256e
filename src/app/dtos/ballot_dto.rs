use crate::app::dtos::page_dto::Section;
use crate::app::dtos::voting_dto::VotingDetailDto;
use crate::app::entities::voting_entity::{CandidateTally, TokenHolder};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Validate, Debug)]
pub struct CastVoteDto {
    #[validate(length(min = 1))]
    pub identifier: String,

    #[validate(length(min = 1))]
    pub candidate: String,
}

#[derive(Serialize, Deserialize, Validate, Debug)]
pub struct AccessRequestDto {
    #[validate(length(min = 1))]
    pub identifier: String,
}

/// What the ballot panel lets the viewer do, derived from connection,
/// token ownership and voting history.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallotAction {
    #[serde(rename = "hidden")]
    Hidden,
    #[serde(rename = "alreadyVoted")]
    AlreadyVoted,
    #[serde(rename = "castVote")]
    CastVote,
    #[serde(rename = "requestAccess")]
    RequestAccess,
}

#[derive(Serialize, Debug)]
pub struct BallotPanelDto {
    #[serde(rename = "candidates")]
    pub candidates: Vec<CandidateTally>,

    #[serde(rename = "connected")]
    pub connected: bool,

    #[serde(rename = "hasAccessToken")]
    pub has_access_token: bool,

    #[serde(rename = "hasVoted")]
    pub has_voted: bool,

    #[serde(rename = "action")]
    pub action: BallotAction,

    #[serde(rename = "notice")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct VotePageDto {
    #[serde(rename = "details")]
    pub details: Section<VotingDetailDto>,

    #[serde(rename = "ballot")]
    pub ballot: Section<BallotPanelDto>,

    #[serde(rename = "tokenHolders")]
    pub token_holders: Section<Vec<TokenHolder>>,
}
