pub mod ballot_dto;
pub mod page_dto;
pub mod profile_dto;
pub mod result_dto;
pub mod voting_dto;
