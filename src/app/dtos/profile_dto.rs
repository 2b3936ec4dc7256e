use crate::app::entities::voting_entity::VotingStatus;
use alloy_primitives::Address;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug)]
pub struct MintAccessDto {
    pub address: Address,
}

#[derive(Serialize, Deserialize, Validate, Debug)]
pub struct BatchMintDto {
    #[validate(length(min = 1, message = "At least one address is required"))]
    pub addresses: Vec<Address>,
}

#[derive(Serialize, Debug)]
pub struct ProfileEntryDto {
    #[serde(rename = "identifier")]
    pub identifier: String,

    #[serde(rename = "title")]
    pub title: String,

    #[serde(rename = "description")]
    pub description: String,

    #[serde(rename = "startTime")]
    pub start_time: chrono::DateTime<Utc>,

    #[serde(rename = "endTime")]
    pub end_time: chrono::DateTime<Utc>,

    #[serde(rename = "status")]
    pub status: VotingStatus,

    #[serde(rename = "link")]
    pub link: String,
}

#[derive(Serialize, Debug)]
pub struct ProfilePageDto {
    #[serde(rename = "account")]
    pub account: Address,

    #[serde(rename = "degraded")]
    pub degraded: bool,

    #[serde(rename = "message")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(rename = "votings")]
    pub votings: Vec<ProfileEntryDto>,
}
