use crate::args::OutputFormat;
use crate::engine::RunState;
use crate::metrics::BenchmarkStats;

#[must_use]
pub fn summary_lines(stats: &BenchmarkStats, state: RunState) -> Vec<String> {
    let mut lines = Vec::new();
    if state == RunState::Cancelled {
        lines.push("Run cancelled; summary covers completed requests only.".to_owned());
    }
    lines.push(format!("Total Requests: {}", stats.total));
    lines.push(format!(
        "Successful: {} ({}%)",
        stats.success,
        100_u64.saturating_sub(stats.error_rate)
    ));
    lines.push(format!("Errors: {} ({}%)", stats.errors(), stats.error_rate));
    lines.push(format!("Avg Latency: {:.2}ms", stats.avg_ms));
    lines.push(format!(
        "Min/Max Latency: {:.2}ms / {:.2}ms",
        stats.min_ms, stats.max_ms
    ));
    lines.push(format!(
        "P90/P95/P99 Latency: {:.2}ms / {:.2}ms / {:.2}ms",
        stats.p90_ms, stats.p95_ms, stats.p99_ms
    ));
    lines.push(format!("Requests/sec: {:.2}", stats.requests_per_second));
    lines.push(format!("Total Duration: {:.0}ms", stats.total_duration_ms));
    lines
}

#[must_use]
pub fn summary_json(stats: &BenchmarkStats, state: RunState) -> serde_json::Value {
    serde_json::json!({
        "state": state.as_str(),
        "stats": stats,
    })
}

/// Prints the final summary on stdout.
///
/// # Errors
///
/// Returns an error when the JSON summary cannot be serialized.
pub fn print_summary(
    stats: &BenchmarkStats,
    state: RunState,
    format: OutputFormat,
) -> Result<(), serde_json::Error> {
    match format {
        OutputFormat::Text => {
            for line in summary_lines(stats, state) {
                println!("{}", line);
            }
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&summary_json(stats, state))?
            );
        }
    }
    Ok(())
}
