//! CLI command handlers.

pub mod config;
pub mod projects;
pub mod view;
