use crate::app::dtos::page_dto::Section;
use crate::app::entities::voting_entity::{CandidateTally, TokenHolder, VotingStatus};
use alloy_primitives::Address;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

fn validate_title_length(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.len() > 100 {
        Err(ValidationError::new(
            "Title should not be empty and not greater than 100 characters",
        ))
    } else {
        Ok(())
    }
}

fn validate_description_length(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.len() > 500 {
        Err(ValidationError::new(
            "Description should not be empty and not greater than 500 characters",
        ))
    } else {
        Ok(())
    }
}

fn validate_candidates(candidates: &[String]) -> Result<(), ValidationError> {
    if candidates.iter().any(|c| !c.trim().is_empty()) {
        Ok(())
    } else {
        Err(ValidationError::new("At least one candidate is required"))
    }
}

fn validate_candidate_name(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("Candidate name required."))
    } else {
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Validate, Debug)]
pub struct CreateVotingDto {
    // Generated when absent
    #[serde(default)]
    pub identifier: Option<String>,

    #[validate(custom = "validate_title_length")]
    pub title: String,

    #[validate(custom = "validate_description_length")]
    pub description: String,

    pub start_time: chrono::DateTime<Utc>,

    pub end_time: chrono::DateTime<Utc>,

    // Defaults to the configured access contract
    #[serde(default)]
    pub nft_contract: Option<Address>,

    #[validate(custom = "validate_candidates")]
    pub candidates: Vec<String>,
}

#[derive(Serialize, Deserialize, Validate, Debug)]
pub struct CandidateActionDto {
    #[validate(custom = "validate_candidate_name")]
    pub candidate: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct VotingDetailDto {
    #[serde(rename = "identifier")]
    pub identifier: String,

    #[serde(rename = "title")]
    pub title: String,

    #[serde(rename = "description")]
    pub description: String,

    #[serde(rename = "nftContract")]
    pub nft_contract: Address,

    #[serde(rename = "creator")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<Address>,

    #[serde(rename = "startTime")]
    pub start_time: chrono::DateTime<Utc>,

    #[serde(rename = "endTime")]
    pub end_time: chrono::DateTime<Utc>,

    #[serde(rename = "status")]
    pub status: VotingStatus,
}

#[derive(Serialize, Debug)]
pub struct DirectoryEntryDto {
    #[serde(rename = "identifier")]
    pub identifier: String,

    #[serde(rename = "title")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "description")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "startTime")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<chrono::DateTime<Utc>>,

    #[serde(rename = "endTime")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<chrono::DateTime<Utc>>,

    #[serde(rename = "status")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<VotingStatus>,

    #[serde(rename = "link")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(rename = "error")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DirectoryEntryDto {
    pub fn is_ended(&self) -> bool {
        matches!(self.status, Some(VotingStatus::Ended))
    }
}

#[derive(Serialize, Debug)]
pub struct DirectoryViewDto {
    #[serde(rename = "message")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(rename = "votings")]
    pub votings: Vec<DirectoryEntryDto>,
}

#[derive(Serialize, Debug)]
pub struct AccessRecordDto {
    #[serde(rename = "address")]
    pub address: Address,

    #[serde(rename = "hasReceived")]
    pub has_received: bool,
}

#[derive(Serialize, Debug)]
pub struct EditPageDto {
    #[serde(rename = "details")]
    pub details: Section<VotingDetailDto>,

    #[serde(rename = "candidates")]
    pub candidates: Section<Vec<CandidateTally>>,

    #[serde(rename = "accessRequests")]
    pub access_requests: Section<Vec<AccessRecordDto>>,

    #[serde(rename = "tokenHolders")]
    pub token_holders: Section<Vec<TokenHolder>>,

    #[serde(rename = "isOwner")]
    pub is_owner: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn valid_dto() -> CreateVotingDto {
        CreateVotingDto {
            identifier: Some("election-1".to_string()),
            title: "Board election".to_string(),
            description: "Annual board election".to_string(),
            start_time: Utc::now() + Duration::hours(1),
            end_time: Utc::now() + Duration::hours(25),
            nft_contract: None,
            candidates: vec!["Alice".to_string(), "Bob".to_string()],
        }
    }

    #[test]
    fn accepts_a_well_formed_voting() {
        assert!(valid_dto().validate().is_ok());
    }

    #[test]
    fn rejects_oversize_title() {
        let mut dto = valid_dto();
        dto.title = "x".repeat(101);
        assert!(dto.validate().is_err());
    }

    #[test]
    fn rejects_empty_description() {
        let mut dto = valid_dto();
        dto.description = String::new();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn rejects_all_blank_candidates() {
        let mut dto = valid_dto();
        dto.candidates = vec!["   ".to_string(), String::new()];
        assert!(dto.validate().is_err());

        dto.candidates = vec![];
        assert!(dto.validate().is_err());
    }

    #[test]
    fn one_real_candidate_among_blanks_is_enough() {
        let mut dto = valid_dto();
        dto.candidates = vec![String::new(), "Alice".to_string()];
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn blank_candidate_name_fails_candidate_actions() {
        let dto = CandidateActionDto {
            candidate: String::new(),
        };
        assert!(dto.validate().is_err());

        let dto = CandidateActionDto {
            candidate: "   ".to_string(),
        };
        assert!(dto.validate().is_err());
    }
}
