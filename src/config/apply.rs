use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{BenchArgs, PositiveU64, PositiveUsize, parse_header};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::{ConfigFile, DurationValue};

/// Applies configuration values to CLI arguments.
///
/// # Errors
///
/// Returns an error when config values are invalid or conflict with each other.
pub fn apply_config(
    args: &mut BenchArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if config.data.is_some() && config.data_file.is_some() {
        return Err(AppError::config(ConfigError::Conflict {
            left: "data",
            right: "data_file",
        }));
    }

    if !is_cli(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = Some(url);
    }

    if !is_cli(matches, "method")
        && let Some(method) = config.method
    {
        args.method = method;
    }

    if !is_cli(matches, "headers")
        && let Some(headers) = config.headers.as_ref()
    {
        let mut parsed = Vec::with_capacity(headers.len());
        for header in headers {
            parsed.push(parse_header(header)?);
        }
        args.headers = parsed;
    }

    if !is_cli(matches, "content_type")
        && let Some(content_type) = config.content_type.clone()
    {
        args.content_type = Some(content_type);
    }

    // The body comes from one source only; a CLI body hides both config fields.
    if !is_cli(matches, "data") && !is_cli(matches, "data_file") {
        if let Some(data) = config.data.clone() {
            args.data = data;
        }
        if let Some(data_file) = config.data_file.clone() {
            args.data_file = Some(data_file);
        }
    }

    if !is_cli(matches, "user")
        && let Some(user) = config.user.clone()
    {
        args.user = Some(user);
    }

    if !is_cli(matches, "secret")
        && let Some(secret) = config.secret.clone()
    {
        args.secret = Some(secret);
    }

    if !is_cli(matches, "requests")
        && let Some(requests) = config.requests
    {
        args.requests = ensure_positive_u64(requests, "requests")?;
    }

    if !is_cli(matches, "duration")
        && let Some(duration) = config.duration
    {
        args.duration = Some(ensure_positive_u64(duration, "duration")?);
    }

    if !is_cli(matches, "users")
        && let Some(users) = config.users
    {
        args.users = ensure_positive_usize(users, "users")?;
    }

    if !is_cli(matches, "timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.timeout = to_duration(timeout, "timeout")?;
    }

    if !is_cli(matches, "pacing")
        && let Some(pacing) = config.pacing.as_ref()
    {
        args.pacing = to_duration(pacing, "pacing")?;
    }

    if !is_cli(matches, "notify_every")
        && let Some(notify_every) = config.notify_every
    {
        args.notify_every = notify_every;
    }

    if !is_cli(matches, "output_format")
        && let Some(output_format) = config.output_format
    {
        args.output_format = output_format;
    }

    if !is_cli(matches, "export_json")
        && let Some(path) = config.export_json.clone()
    {
        args.export_json = Some(path);
    }

    if !is_cli(matches, "export_csv")
        && let Some(path) = config.export_csv.clone()
    {
        args.export_csv = Some(path);
    }

    if !is_cli(matches, "pretty")
        && let Some(pretty) = config.pretty
    {
        args.pretty = pretty;
    }

    Ok(())
}

/// True when the value came from the command line or its environment variable.
fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}

fn ensure_positive_u64(value: u64, field: &str) -> AppResult<PositiveU64> {
    PositiveU64::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn ensure_positive_usize(value: usize, field: &str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn to_duration(value: &DurationValue, field: &'static str) -> AppResult<std::time::Duration> {
    value.to_duration().map_err(|err| {
        AppError::config(ConfigError::InvalidDuration {
            field,
            source: err,
        })
    })
}
