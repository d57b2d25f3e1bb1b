use std::time::Duration;

use serde::Deserialize;

use crate::args::{HttpMethod, OutputFormat, parse_duration_text};
use crate::error::ValidationError;

/// Values accepted in `benchpro.toml` / `benchpro.json`. Every field is
/// optional; anything set on the command line wins.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub method: Option<HttpMethod>,
    pub url: Option<String>,
    /// Header lines in `Name: Value` format.
    pub headers: Option<Vec<String>>,
    pub content_type: Option<String>,
    pub data: Option<String>,
    pub data_file: Option<String>,
    pub user: Option<String>,
    pub secret: Option<String>,
    pub requests: Option<u64>,
    /// Duration-mode length in seconds.
    pub duration: Option<u64>,
    pub users: Option<usize>,
    pub timeout: Option<DurationValue>,
    pub pacing: Option<DurationValue>,
    pub notify_every: Option<usize>,
    pub output_format: Option<OutputFormat>,
    pub export_json: Option<String>,
    pub export_csv: Option<String>,
    pub pretty: Option<bool>,
}

/// Either plain seconds (`timeout = 5`) or text with a unit (`timeout = "250ms"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration_text(text),
        }
    }
}
