//! Storefront CLI
//!
//! The `storefront` console: argument parsing, configuration resolution,
//! logging setup and one subcommand per user flow.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod args;
pub mod commands;
pub mod config;
pub mod logging;

pub use args::{command, Action, GlobalArgs, Invocation};
pub use commands::{connect, execute};
pub use config::{StorefrontConfig, API_URL_ENV};

/// Parse, configure and run; returns the text to print
pub async fn run(invocation: &Invocation) -> anyhow::Result<String> {
    let config = StorefrontConfig::resolve(
        invocation.global.config.as_deref(),
        invocation.global.api_url.clone(),
    )?;
    let gateway = connect(&config, invocation.global.offline)?;
    execute(&invocation.action, gateway, config.controller).await
}
