//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use cli::BenchArgs;
pub use types::{HttpMethod, OutputFormat, PositiveU64, PositiveUsize};

pub(crate) use parsers::{parse_duration_arg, parse_duration_text, parse_header};
