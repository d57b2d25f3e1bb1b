use crate::args::OutputFormat;
use crate::engine::RunOptions;
use crate::http::RequestConfig;

pub(in crate::entry) struct OutputSettings {
    pub(in crate::entry) format: OutputFormat,
    pub(in crate::entry) export_json: Option<String>,
    pub(in crate::entry) export_csv: Option<String>,
}

pub(in crate::entry) enum RunMode {
    /// One request; the response body is printed.
    Single { pretty: bool },
    Load(RunOptions),
}

pub(in crate::entry) struct RunPlan {
    pub(in crate::entry) request: RequestConfig,
    pub(in crate::entry) mode: RunMode,
    pub(in crate::entry) output: OutputSettings,
}
