//! Request configuration and single-request execution.
mod executor;
mod request;

#[cfg(test)]
pub(crate) mod test_support;

pub use executor::{
    AttemptOutcome, HttpExecutor, RequestDetails, RequestExecutor, SingleResponse,
    TIMESTAMP_HEADER, execute_request, execute_single_request,
};
pub use request::{DEFAULT_REQUEST_TIMEOUT, RequestConfig, StopRule, parse_header_block};

#[cfg(test)]
pub(crate) use executor::DEFAULT_USER_AGENT;
