pub mod voting_entity;
