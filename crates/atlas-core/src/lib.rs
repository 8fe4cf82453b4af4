//! Core atlas library (config, session store, API client, session lifecycle).

pub mod api;
pub mod auth;
pub mod config;
pub mod forms;
pub mod session;
