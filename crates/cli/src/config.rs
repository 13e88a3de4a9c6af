//! Command-line and environment configuration.
//!
//! Every setting can come from a long flag or from its `APP_*` environment
//! variable; the flag wins when both are present.

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use clients::http::{HttpConfig, DEFAULT_GENERATE_URL};
use engine::{Identity, RunnerConfig};

#[derive(Parser, Debug)]
#[command(
    name = "webhook-handshake",
    about = "Register with the grading service and submit the selected SQL answer",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub config: AppConfig,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Register, then submit the selected query (the default).
    Run,
    /// Show which query the registration number selects, without any network calls.
    Preview,
}

/// Settings for one handshake run.
#[derive(Args, Debug, Clone)]
pub struct AppConfig {
    /// Full name to register with.
    #[arg(long, env = "APP_NAME", default_value = "", global = true)]
    pub name: String,

    /// Registration number; its trailing digits pick the query.
    #[arg(long, env = "APP_REG_NO", default_value = "", global = true)]
    pub reg_no: String,

    #[arg(long, env = "APP_EMAIL", default_value = "", global = true)]
    pub email: String,

    /// Endpoint that issues the webhook and access token.
    #[arg(long, env = "APP_GENERATE_URL", default_value = DEFAULT_GENERATE_URL, global = true)]
    pub generate_url: String,

    /// Submit here instead of the webhook returned by registration.
    #[arg(long, env = "APP_SUBMIT_URL", global = true)]
    pub submit_url: Option<String>,

    #[arg(long, env = "APP_CONNECT_TIMEOUT_SECS", default_value_t = 10, global = true)]
    pub connect_timeout_secs: u64,

    #[arg(long, env = "APP_READ_TIMEOUT_SECS", default_value_t = 20, global = true)]
    pub read_timeout_secs: u64,

    /// Retries for connect errors and timeouts (0 = never retry).
    #[arg(long, env = "APP_MAX_RETRIES", default_value_t = 0, global = true)]
    pub max_retries: u32,

    #[arg(long, env = "APP_RETRY_BASE_DELAY_MS", default_value_t = 500, global = true)]
    pub retry_base_delay_ms: u64,
}

impl AppConfig {
    pub fn identity(&self) -> Identity {
        Identity::new(&self.name, &self.reg_no, &self.email)
    }

    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            generate_url: self.generate_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            read_timeout: Duration::from_secs(self.read_timeout_secs),
            ..HttpConfig::default()
        }
    }

    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            max_retries: self.max_retries,
            retry_base_delay: Duration::from_millis(self.retry_base_delay_ms),
            submit_url: self.submit_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let argv = std::iter::once("webhook-handshake").chain(args.iter().copied());
        Cli::try_parse_from(argv).expect("arguments should parse")
    }

    #[test]
    fn identity_flags_build_identity() {
        let cli = parse(&[
            "--name",
            "Ada Lovelace",
            "--reg-no",
            "REG12345",
            "--email",
            "ada@example.com",
        ]);
        assert_eq!(cli.command, None);
        assert_eq!(
            cli.config.identity(),
            Identity::new("Ada Lovelace", "REG12345", "ada@example.com")
        );
    }

    #[test]
    fn transport_flags_map_to_http_config() {
        let cli = parse(&[
            "--generate-url",
            "http://127.0.0.1:9000/generate",
            "--connect-timeout-secs",
            "3",
            "--read-timeout-secs",
            "7",
        ]);
        let http = cli.config.http_config();
        assert_eq!(http.generate_url, "http://127.0.0.1:9000/generate");
        assert_eq!(http.connect_timeout, Duration::from_secs(3));
        assert_eq!(http.read_timeout, Duration::from_secs(7));
        assert!(http.user_agent.starts_with("webhook-handshake/"));
    }

    #[test]
    fn retry_and_submit_flags_map_to_runner_config() {
        let cli = parse(&[
            "--max-retries",
            "2",
            "--retry-base-delay-ms",
            "250",
            "--submit-url",
            "https://example.test/testWebhook",
        ]);
        let runner = cli.config.runner_config();
        assert_eq!(runner.max_retries, 2);
        assert_eq!(runner.retry_base_delay, Duration::from_millis(250));
        assert_eq!(runner.submit_url.as_deref(), Some("https://example.test/testWebhook"));
    }

    #[test]
    fn preview_accepts_flags_after_the_subcommand() {
        let cli = parse(&["preview", "--reg-no", "REG7", "--debug"]);
        assert_eq!(cli.command, Some(Command::Preview));
        assert_eq!(cli.config.reg_no, "REG7");
        assert!(cli.debug);
    }

    #[test]
    fn non_numeric_timeout_is_rejected() {
        let result = Cli::try_parse_from(["webhook-handshake", "--read-timeout-secs", "soon"]);
        assert!(result.is_err());
    }
}
