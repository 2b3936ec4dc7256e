pub mod ballot_service;
pub mod directory_service;
pub mod profile_service;
pub mod result_service;
pub mod voting_service;
