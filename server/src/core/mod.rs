//! Core application infrastructure

pub mod cli;
pub mod config;
pub mod constants;

pub use crate::app::CoreApp;
pub use cli::Cli;
pub use config::{AppConfig, ServerConfig};
