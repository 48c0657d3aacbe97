pub mod capture;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod location;
pub mod mail;
pub mod map;
pub mod risk;
pub mod store;
