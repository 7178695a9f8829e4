//! geyser-sync - Geyser plugin deployment for Spigot servers
//!
//! Pulls the last successful Geyser build from Jenkins, pushes it into a
//! server's plugin directory over FTP and keeps track of what is deployed.

pub mod audit;
pub mod cache;
pub mod ci;
pub mod cli;
pub mod config;
pub mod error;
pub mod sync;
pub mod transfer;
pub mod ui;

pub use error::{SyncError, SyncResult};
