//! `webhook-handshake` CLI entry-point.
//!
//! Available sub-commands:
//! - `run`     — register, select the query, and submit it (default).
//! - `preview` — print the query the registration number selects.
//!
//! The process exits with status 0 whether or not the handshake succeeds;
//! failures are reported on stderr.

mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use clients::HttpClient;
use engine::{last_two_digits, select_query, HandshakeRunner};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, Cli, Command};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let result = match cli.command.unwrap_or(Command::Run) {
        Command::Run => run(&cli.config).await,
        Command::Preview => {
            preview(&cli.config);
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("{e:?}");
    }
}

/// Logs go to stderr so stdout carries only the result lines.
fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

async fn run(config: &AppConfig) -> Result<()> {
    let identity = config.identity();
    let blank = identity.blank_fields();
    if !blank.is_empty() {
        warn!(fields = ?blank, "identity fields are empty, registering anyway");
    }

    let client = Arc::new(
        HttpClient::new(config.http_config()).context("failed to set up HTTP client")?,
    );
    info!(generate_url = %client.config().generate_url, "starting handshake");

    let runner = HandshakeRunner::new(client.clone(), client, config.runner_config());
    let outcome = runner.run(&identity).await.context("handshake aborted")?;

    println!("Submission HTTP status: {}", outcome.submission.status);
    println!("Submission body: {}", outcome.submission.body);
    Ok(())
}

fn preview(config: &AppConfig) {
    let value = last_two_digits(&config.reg_no);
    let query = select_query(&config.reg_no);
    let parity = if value % 2 == 1 { "odd" } else { "even" };

    println!("Registration number: {:?}", config.reg_no);
    println!("Trailing value: {value} ({parity})");
    println!("Selected: {}", query.label());
    println!("{}", query.sql());
}
