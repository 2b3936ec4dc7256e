pub mod ballot_controller;
pub mod home_controller;
pub mod profile_controller;
pub mod result_controller;
pub mod session_controller;
pub mod voting_controller;
