use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::args::OutputFormat;
use crate::engine::{ChannelObserver, ObserverChannels, RunOptions, run_load_test};
use crate::error::AppResult;
use crate::http::{HttpExecutor, RequestConfig, execute_single_request};
use crate::metrics::{BenchmarkResult, BenchmarkStats};
use crate::report;
use crate::shutdown::{CancelSignal, setup_signal_handler};

use super::types::{OutputSettings, RunMode, RunPlan};

pub(in crate::entry) async fn execute_plan(plan: RunPlan) -> AppResult<()> {
    match plan.mode {
        RunMode::Single { pretty } => run_single(&plan.request, &plan.output, pretty).await,
        RunMode::Load(options) => run_load(&plan.request, &plan.output, options).await,
    }
}

async fn run_single(
    request: &RequestConfig,
    output: &OutputSettings,
    pretty: bool,
) -> AppResult<()> {
    let response = execute_single_request(request).await?;
    match output.format {
        OutputFormat::Text => {
            for line in report::single_response_lines(&response, pretty) {
                println!("{}", line);
            }
        }
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "result": &response.result,
                "request": &response.details,
                "body": report::format_body(&response.body, pretty),
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }
    export_results(
        output,
        &response.stats,
        std::slice::from_ref(&response.result),
    )
    .await
}

async fn run_load(
    request: &RequestConfig,
    output: &OutputSettings,
    options: RunOptions,
) -> AppResult<()> {
    let executor = Arc::new(HttpExecutor::new(request)?);
    let cancel = CancelSignal::new();
    let signal_handle = setup_signal_handler(&cancel);
    let (observer, channels) = ChannelObserver::new();
    let reporter = spawn_progress_reporter(channels);

    let result = run_load_test(request, executor, Arc::new(observer), &cancel, options).await;

    // Stops the signal handler; the reporter ends once the observer is dropped.
    cancel.cancel();
    if let Err(err) = signal_handle.await {
        debug!("Signal handler join error: {}", err);
    }
    if let Err(err) = reporter.await {
        debug!("Progress reporter join error: {}", err);
    }

    let outcome = result?;
    report::print_summary(&outcome.stats, outcome.state, output.format)?;
    export_results(output, &outcome.stats, &outcome.results).await
}

/// Logs partial summaries as they arrive until the run drops its observer.
fn spawn_progress_reporter(channels: ObserverChannels) -> JoinHandle<()> {
    let ObserverChannels {
        mut progress,
        mut partials,
    } = channels;
    tokio::spawn(async move {
        let mut progress_open = true;
        loop {
            tokio::select! {
                update = partials.recv() => {
                    let Some(update) = update else {
                        break;
                    };
                    info!(
                        "Progress {:>3.0}%: {} requests, {} errors, avg {:.2}ms, p95 {:.2}ms",
                        *progress.borrow() * 100.0,
                        update.stats.total,
                        update.stats.errors(),
                        update.stats.avg_ms,
                        update.stats.p95_ms
                    );
                }
                changed = progress.changed(), if progress_open => {
                    if changed.is_err() {
                        progress_open = false;
                    }
                }
            }
        }
    })
}

async fn export_results(
    output: &OutputSettings,
    stats: &BenchmarkStats,
    results: &[BenchmarkResult],
) -> AppResult<()> {
    if let Some(path) = output.export_json.as_deref() {
        if let Err(err) = report::export_json(path, stats, results).await {
            warn!("Failed to export JSON to {}: {}", path, err);
            return Err(err.into());
        }
        info!("Exported JSON to {}", path);
    }
    if let Some(path) = output.export_csv.as_deref() {
        if let Err(err) = report::export_csv(path, results).await {
            warn!("Failed to export CSV to {}: {}", path, err);
            return Err(err.into());
        }
        info!("Exported CSV to {}", path);
    }
    Ok(())
}
