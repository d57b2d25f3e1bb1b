use clap::{CommandFactory, FromArgMatches};

use crate::error::{AppError, AppResult};

use super::BenchArgs;

pub(crate) fn parse_test_args<I, T>(args: I) -> AppResult<BenchArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let (args, _) = parse_test_matches(args)?;
    Ok(args)
}

/// Parses like the binary does, keeping the matches for value-source checks.
pub(crate) fn parse_test_matches<I, T>(args: I) -> AppResult<(BenchArgs, clap::ArgMatches)>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = BenchArgs::command().try_get_matches_from(args)?;
    let parsed = BenchArgs::from_arg_matches(&matches).map_err(AppError::from)?;
    Ok((parsed, matches))
}
