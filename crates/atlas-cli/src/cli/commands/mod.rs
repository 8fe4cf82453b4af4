pub mod auth;
pub mod config;
pub mod jobs;
pub mod tui;
