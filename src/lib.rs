//! Core library for the `benchpro` CLI.
//!
//! Sends single HTTP requests for inspection and drives concurrent load
//! tests against one endpoint. The engine ([`engine::run_load_test`]) runs
//! virtual users over a [`http::RequestExecutor`], collects every attempt in
//! order and summarizes latency with [`metrics::summarize`]. Requests can be
//! signed with an HMAC-SHA256 `Authorization` header ([`auth::sign`]).
pub mod args;
pub mod auth;
pub mod config;
pub mod engine;
pub mod entry;
pub mod error;
pub mod http;
pub mod logger;
pub mod metrics;
pub mod report;
pub mod shutdown;
