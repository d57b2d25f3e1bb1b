use std::path::PathBuf;

use clap::ArgMatches;

use crate::args::BenchArgs;
use crate::auth::Credentials;
use crate::config::{apply_config, load_config};
use crate::engine::{NotifyPolicy, RunOptions};
use crate::error::{AppError, AppResult, HttpError, ValidationError};
use crate::http::RequestConfig;

use super::types::{OutputSettings, RunMode, RunPlan};

pub(in crate::entry) fn build_plan(
    mut args: BenchArgs,
    matches: &ArgMatches,
) -> AppResult<RunPlan> {
    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, matches, &config)?;
    }

    let url = match args.url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => url.to_owned(),
        Some(_) | None => {
            tracing::error!("Missing URL (set --url or provide in config).");
            return Err(AppError::validation(ValidationError::MissingUrl));
        }
    };

    let body = match args.data_file.as_deref() {
        Some(path) => std::fs::read_to_string(path).map_err(|err| {
            AppError::http(HttpError::ReadBodyFile {
                path: PathBuf::from(path),
                source: err,
            })
        })?,
        None => args.data.clone(),
    };

    let credentials = resolve_credentials(args.user.as_deref(), args.secret.as_deref())?;

    let request = RequestConfig {
        url,
        method: args.method,
        headers: args.header_block(),
        body,
        content_type: args.content_type.clone(),
        credentials,
        count: args.requests.get(),
        duration_secs: args.duration.map_or(0, u64::from),
        concurrent_users: args.users.get(),
        timeout: args.timeout,
    };

    let mode = if request.is_single_request() {
        RunMode::Single {
            pretty: args.pretty,
        }
    } else {
        RunMode::Load(RunOptions {
            notify: if args.notify_every == 0 {
                NotifyPolicy::Never
            } else {
                NotifyPolicy::EveryN(args.notify_every)
            },
            pacing: args.pacing,
        })
    };

    Ok(RunPlan {
        request,
        mode,
        output: OutputSettings {
            format: args.output_format,
            export_json: args.export_json,
            export_csv: args.export_csv,
        },
    })
}

/// Signing needs both halves; empty values count as unset.
fn resolve_credentials(
    user: Option<&str>,
    secret: Option<&str>,
) -> AppResult<Option<Credentials>> {
    let user = user.filter(|value| !value.is_empty());
    let secret = secret.filter(|value| !value.is_empty());
    match (user, secret) {
        (None, None) => Ok(None),
        (Some(_), None) | (None, Some(_)) => Err(AppError::validation(
            ValidationError::IncompleteCredentials,
        )),
        (Some(user), Some(secret)) => Ok(Credentials::from_parts(Some(user), Some(secret))),
    }
}
