//! Database connection string toolkit.
//!
//! # Security Guarantees
//! - Secrets come from the environment or a prompt, never from logs
//! - Connection strings are redacted before they are logged
//! - Passwords can be kept as AES-256 tokens at rest

use anyhow::Result;
use clap::Parser;
use dbstring::{Cli, execute_cli, resolve_secret};
use dbstring_core::logging::init_logging;
use tracing::error;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet)?;

    let secret = resolve_secret(&cli.global)?;
    let secret = secret.as_deref().map(String::as_str);

    let output = execute_cli(&cli, secret, &mut std::io::stdin().lock()).inspect_err(|e| {
        error!("{:#}", e);
    })?;
    println!("{output}");

    Ok(())
}
