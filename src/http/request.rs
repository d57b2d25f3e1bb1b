use std::time::Duration;

use reqwest::Url;

use crate::{
    args::HttpMethod,
    auth::Credentials,
    error::{AppError, AppResult, ValidationError},
};

/// Per-request client timeout used unless the caller overrides it.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything needed to describe one load test. Built once per run and only
/// read afterwards.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub url: String,
    pub method: HttpMethod,
    /// Raw header block, one `Name: Value` per line.
    pub headers: String,
    pub body: String,
    pub content_type: Option<String>,
    pub credentials: Option<Credentials>,
    /// Target number of requests; ignored when `duration_secs > 0`.
    pub count: u64,
    pub duration_secs: u64,
    pub concurrent_users: usize,
    pub timeout: Duration,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: HttpMethod::Get,
            headers: String::new(),
            body: String::new(),
            content_type: None,
            credentials: None,
            count: 1,
            duration_secs: 0,
            concurrent_users: 1,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopRule {
    Count(u64),
    Duration(Duration),
}

impl RequestConfig {
    /// Duration mode wins whenever a positive duration is configured.
    #[must_use]
    pub const fn stop_rule(&self) -> StopRule {
        if self.duration_secs > 0 {
            StopRule::Duration(Duration::from_secs(self.duration_secs))
        } else {
            StopRule::Count(self.count)
        }
    }

    #[must_use]
    pub fn users(&self) -> usize {
        self.concurrent_users.max(1)
    }

    /// True when the caller asked for exactly one request in count mode.
    #[must_use]
    pub const fn is_single_request(&self) -> bool {
        matches!(self.stop_rule(), StopRule::Count(1))
    }

    #[must_use]
    pub fn header_lines(&self) -> Vec<(String, String)> {
        parse_header_block(&self.headers)
    }

    /// Checks the parts of the config that do not depend on the executor.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a missing or unusable URL, a zero
    /// request count in count mode, or a zero timeout.
    pub fn validate(&self) -> AppResult<Url> {
        let raw = self.url.trim();
        if raw.is_empty() {
            return Err(AppError::validation(ValidationError::MissingUrl));
        }
        let url = Url::parse(raw).map_err(|err| {
            AppError::validation(ValidationError::InvalidUrl {
                url: raw.to_owned(),
                source: err,
            })
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::validation(ValidationError::UnsupportedScheme {
                scheme: url.scheme().to_owned(),
            }));
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(AppError::validation(ValidationError::UrlMissingHost));
        }
        if self.timeout.is_zero() {
            return Err(AppError::validation(ValidationError::TimeoutZero));
        }
        if let StopRule::Count(0) = self.stop_rule() {
            return Err(AppError::validation(ValidationError::RequestCountZero));
        }
        Ok(url)
    }
}

/// Splits a raw header block into trimmed `(name, value)` pairs.
///
/// Each line is split on its first `:`. Lines without a colon, or with an
/// empty name, are skipped.
#[must_use]
pub fn parse_header_block(block: &str) -> Vec<(String, String)> {
    block
        .lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim(), value.trim()))
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, value)| (name.to_owned(), value.to_owned()))
        .collect()
}
