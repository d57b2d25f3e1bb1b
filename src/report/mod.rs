//! Console and file output for finished runs.
mod body;
mod export;
mod summary;


pub use body::{format_body, single_response_lines};
pub use export::{export_csv, export_json};
pub use summary::{print_summary, summary_json, summary_lines};
