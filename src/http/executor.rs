use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, SecondsFormat};
use reqwest::{
    Client, Method, Request, Url,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::{
    auth::Credentials,
    error::{AppError, AppResult, HttpError},
    metrics::{BenchmarkResult, BenchmarkStats, summarize},
};

use super::request::RequestConfig;

/// Header carrying the request creation time; also the message that gets signed.
pub const TIMESTAMP_HEADER: &str = "X-Timestamp";

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("benchpro/", env!("CARGO_PKG_VERSION"));

/// Format used for the human-readable completion stamp on each result.
const RESULT_TIME_FORMAT: &str = "%H:%M:%S";

/// What a single attempt produced before it is given a place in the result log.
#[derive(Debug, Clone)]
pub struct AttemptOutcome {
    pub completed_at: DateTime<Local>,
    pub duration: Duration,
    /// HTTP status, or `0` when no response was received.
    pub status: u16,
}

impl AttemptOutcome {
    #[must_use]
    pub fn new(duration: Duration, status: u16) -> Self {
        Self {
            completed_at: Local::now(),
            duration,
            status,
        }
    }

    /// An attempt whose request could not even be built.
    #[must_use]
    pub fn construction_failed() -> Self {
        Self::new(Duration::ZERO, 0)
    }

    #[must_use]
    pub fn into_result(self, seq: u64) -> BenchmarkResult {
        BenchmarkResult {
            seq,
            timestamp: self.completed_at.format(RESULT_TIME_FORMAT).to_string(),
            duration_ms: self.duration.as_secs_f64() * 1000.0,
            status: self.status,
        }
    }
}

/// Issues one request per call. The load-test engine only talks to this seam.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Upper bound on how long one attempt may take.
    fn timeout(&self) -> Duration;

    async fn attempt(&self) -> AttemptOutcome;
}

#[derive(Debug, Clone)]
struct RequestTemplate {
    method: Method,
    url: Url,
    headers: Vec<(String, String)>,
    body: String,
    content_type: Option<String>,
    credentials: Option<Credentials>,
}

impl RequestTemplate {
    fn build(&self, client: &Client, timestamp: &str) -> Result<Request, HttpError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("x-timestamp"),
            header_value(TIMESTAMP_HEADER, timestamp)?,
        );
        if let Some(content_type) = self.content_type.as_deref() {
            headers.insert(CONTENT_TYPE, header_value("Content-Type", content_type)?);
        }
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|err| {
                HttpError::InvalidHeaderName {
                    name: name.clone(),
                    source: err,
                }
            })?;
            headers.insert(header_name, header_value(name, value)?);
        }
        if let Some(credentials) = self.credentials.as_ref() {
            headers.insert(
                AUTHORIZATION,
                header_value("Authorization", &credentials.authorization(timestamp))?,
            );
        }

        client
            .request(self.method.clone(), self.url.clone())
            .headers(headers)
            .body(self.body.clone())
            .build()
            .map_err(|err| HttpError::BuildRequestFailed { source: err })
    }

    fn auth_description(&self, timestamp: &str) -> String {
        self.credentials.as_ref().map_or_else(
            || "No authentication".to_owned(),
            |credentials| {
                format!(
                    "HMAC - User: {}, Signature: {}",
                    credentials.user_id,
                    credentials.signature(timestamp)
                )
            },
        )
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, HttpError> {
    HeaderValue::from_str(value).map_err(|err| HttpError::InvalidHeaderValue {
        name: name.to_owned(),
        source: err,
    })
}

fn request_timestamp() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// reqwest-backed executor for one configured target.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
    template: RequestTemplate,
    timeout: Duration,
}

impl HttpExecutor {
    /// Builds the client and request template for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error when the config is invalid or the client cannot be built.
    pub fn new(config: &RequestConfig) -> AppResult<Self> {
        let url = config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))?;

        Ok(Self {
            client,
            template: RequestTemplate {
                method: config.method.to_reqwest(),
                url,
                headers: config.header_lines(),
                body: config.body.clone(),
                content_type: config
                    .content_type
                    .as_deref()
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .map(str::to_owned),
                credentials: config.credentials.clone(),
            },
            timeout: config.timeout,
        })
    }

    /// Sends one request and reads the whole response body.
    pub async fn send_capturing_body(&self) -> SingleResponse {
        let timestamp = request_timestamp();
        let auth = self.template.auth_description(&timestamp);
        let request = match self.template.build(&self.client, &timestamp) {
            Ok(request) => request,
            Err(err) => {
                warn!("Failed to build request: {}", err);
                let result = AttemptOutcome::construction_failed().into_result(1);
                return SingleResponse {
                    stats: summarize(std::slice::from_ref(&result), Duration::ZERO),
                    result,
                    body: format!("Error: {}", err),
                    details: RequestDetails {
                        method: self.template.method.to_string(),
                        url: self.template.url.to_string(),
                        headers: String::new(),
                        body: self.template.body.clone(),
                        timestamp,
                        auth,
                    },
                };
            }
        };

        let details = RequestDetails {
            method: request.method().to_string(),
            url: request.url().to_string(),
            headers: render_headers(request.headers()),
            body: self.template.body.clone(),
            timestamp,
            auth,
        };

        let start = Instant::now();
        let (duration, status, body) = match self.client.execute(request).await {
            Ok(response) => {
                let duration = start.elapsed();
                let status = response.status().as_u16();
                let body = match response.text().await {
                    Ok(text) => text,
                    Err(err) => format!("Error reading body: {}", err),
                };
                (duration, status, body)
            }
            Err(err) => (start.elapsed(), 0, format!("Error: {}", err)),
        };

        let result = AttemptOutcome::new(duration, status).into_result(1);
        SingleResponse {
            stats: summarize(std::slice::from_ref(&result), duration),
            result,
            body,
            details,
        }
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn attempt(&self) -> AttemptOutcome {
        let timestamp = request_timestamp();
        let request = match self.template.build(&self.client, &timestamp) {
            Ok(request) => request,
            Err(err) => {
                warn!("Failed to build request: {}", err);
                return AttemptOutcome::construction_failed();
            }
        };

        let start = Instant::now();
        let status = match self.client.execute(request).await {
            // Dropping the response releases the connection without reading the body.
            Ok(response) => response.status().as_u16(),
            Err(err) => {
                debug!("Request failed: {}", err);
                0
            }
        };
        AttemptOutcome::new(start.elapsed(), status)
    }
}

fn render_headers(headers: &HeaderMap) -> String {
    let mut rendered = String::new();
    for (name, value) in headers {
        rendered.push_str(name.as_str());
        rendered.push_str(": ");
        rendered.push_str(value.to_str().unwrap_or("<binary>"));
        rendered.push('\n');
    }
    rendered
}

/// The request exactly as it was sent, for display next to the response.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RequestDetails {
    pub method: String,
    pub url: String,
    pub headers: String,
    pub body: String,
    pub timestamp: String,
    pub auth: String,
}

#[derive(Debug, Clone)]
pub struct SingleResponse {
    pub result: BenchmarkResult,
    pub stats: BenchmarkStats,
    pub body: String,
    pub details: RequestDetails,
}

/// Executes one request and stamps it with `seq`.
///
/// # Errors
///
/// Returns an error when the config is invalid or the HTTP client cannot be built.
pub async fn execute_request(config: &RequestConfig, seq: u64) -> AppResult<BenchmarkResult> {
    let executor = HttpExecutor::new(config)?;
    Ok(executor.attempt().await.into_result(seq))
}

/// Executes one request and captures the full response body.
///
/// # Errors
///
/// Returns an error when the config is invalid or the HTTP client cannot be built.
pub async fn execute_single_request(config: &RequestConfig) -> AppResult<SingleResponse> {
    let executor = HttpExecutor::new(config)?;
    Ok(executor.send_capturing_body().await)
}
