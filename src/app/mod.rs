pub mod routes;
pub mod init;
pub mod config;

pub mod chain;
pub mod controllers;
pub mod dtos;
pub mod entities;
pub mod manifest;
pub mod services;
pub mod utils;
