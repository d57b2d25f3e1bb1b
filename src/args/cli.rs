use clap::Parser;
use std::time::Duration;

use super::defaults::{DEFAULT_NOTIFY_EVERY, DEFAULT_PACING, DEFAULT_TIMEOUT};
use super::parsers::{parse_duration_arg, parse_header, parse_positive_u64, parse_positive_usize};
use super::types::{HttpMethod, OutputFormat, PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "benchpro",
    version,
    about = "Send one HTTP request and inspect the response, or load-test an endpoint with concurrent users and latency statistics."
)]
pub struct BenchArgs {
    /// Target URL
    #[arg(long, short)]
    pub url: Option<String>,

    /// HTTP method to use
    #[arg(long, short = 'X', default_value = "get", ignore_case = true)]
    pub method: HttpMethod,

    /// HTTP headers in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Content-Type header (shortcut)
    #[arg(long = "content-type", short = 'T')]
    pub content_type: Option<String>,

    /// Request body data
    #[arg(long, short, default_value = "")]
    pub data: String,

    /// Request body from file
    #[arg(long = "data-file", short = 'D', conflicts_with = "data")]
    pub data_file: Option<String>,

    /// User id for HMAC request signing (requires --secret)
    #[arg(long = "user")]
    pub user: Option<String>,

    /// Shared secret for HMAC request signing (requires --user)
    #[arg(long = "secret", env = "BENCHPRO_SECRET", hide_env_values = true)]
    pub secret: Option<String>,

    /// Total number of requests; 1 runs a single request and prints the response
    #[arg(
        long = "requests",
        short = 'n',
        default_value = "1",
        value_parser = parse_positive_u64
    )]
    pub requests: PositiveU64,

    /// Run for this many seconds instead of a fixed request count
    #[arg(long = "duration", short = 't', value_parser = parse_positive_u64)]
    pub duration: Option<PositiveU64>,

    /// Number of concurrent virtual users
    #[arg(
        long = "users",
        short = 'c',
        default_value = "1",
        value_parser = parse_positive_usize
    )]
    pub users: PositiveUsize,

    /// Per-request timeout (supports ms/s/m/h)
    #[arg(long = "timeout", default_value = DEFAULT_TIMEOUT, value_parser = parse_duration_arg)]
    pub timeout: Duration,

    /// Pause each user takes between requests (supports ms/s/m/h)
    #[arg(long = "pacing", default_value = DEFAULT_PACING, value_parser = parse_duration_arg)]
    pub pacing: Duration,

    /// Emit a partial summary every N completed requests (0 disables)
    #[arg(long = "notify-every", default_value_t = DEFAULT_NOTIFY_EVERY)]
    pub notify_every: usize,

    /// Summary output format
    #[arg(long = "output-format", default_value = "text", ignore_case = true)]
    pub output_format: OutputFormat,

    /// Export the result log and summary as JSON
    #[arg(long = "export-json")]
    pub export_json: Option<String>,

    /// Export the result log as CSV
    #[arg(long = "export-csv")]
    pub export_csv: Option<String>,

    /// Pretty-print JSON/XML response bodies in single-request mode
    #[arg(long = "pretty")]
    pub pretty: bool,

    /// Enable verbose logging (sets log level to debug unless overridden by BENCHPRO_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Path to config file (TOML/JSON). Defaults to ./benchpro.toml or ./benchpro.json if present.
    #[arg(long = "config")]
    pub config: Option<String>,
}

impl BenchArgs {
    /// Renders `-H` pairs back into a header block, one `Name: Value` per line.
    #[must_use]
    pub fn header_block(&self) -> String {
        self.headers
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
