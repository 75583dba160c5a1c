//! This crate contains all shared fullstack server functions.
use dioxus::prelude::*;

pub mod config;
pub mod types;

#[cfg(feature = "server")]
pub mod db;

#[cfg(feature = "server")]
pub mod state;

mod auth;

#[cfg(all(test, feature = "server"))]
mod domain_tests;

#[cfg(test)]
mod types_tests;

#[cfg(all(test, feature = "server"))]
pub mod test_utils;

/// Health check endpoint
#[get("/api/health")]
pub async fn health_check() -> Result<String, ServerFnError> {
    #[cfg(feature = "server")]
    tracing::debug!("health_check");
    Ok("OK".to_string())
}

pub use auth::{auth_me, sign_in, sign_up};
