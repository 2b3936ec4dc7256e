use crate::app::dtos::page_dto::Section;
use crate::app::dtos::voting_dto::VotingDetailDto;
use crate::app::entities::voting_entity::TokenHolder;
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct OutcomeDto {
    #[serde(rename = "kind")]
    pub kind: String,

    #[serde(rename = "icon")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(rename = "label")]
    pub label: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CandidateResultDto {
    #[serde(rename = "name")]
    pub name: String,

    #[serde(rename = "votes")]
    pub votes: u64,

    #[serde(rename = "winner")]
    pub winner: bool,
}

#[derive(Serialize, Debug)]
pub struct ResultPageDto {
    #[serde(rename = "outcome")]
    pub outcome: OutcomeDto,

    #[serde(rename = "candidates")]
    pub candidates: Vec<CandidateResultDto>,

    #[serde(rename = "details")]
    pub details: Section<VotingDetailDto>,

    #[serde(rename = "tokenHolders")]
    pub token_holders: Section<Vec<TokenHolder>>,
}
