pub mod catalog;
pub mod commands;
pub mod config;
pub mod ledger;
pub mod notifications;
pub mod player;
pub mod playlists;
pub mod search;
pub mod statistics;
pub mod user;

pub use commands::run_scenario;
pub use config::SimConfig;
