use serde::Serialize;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::metrics::{BenchmarkResult, BenchmarkStats};

#[derive(Serialize)]
struct JsonExport<'run> {
    summary: &'run BenchmarkStats,
    results: &'run [BenchmarkResult],
}

/// Writes one CSV row per result, in sequence order.
///
/// # Errors
///
/// Returns an error when the file cannot be created or written.
pub async fn export_csv(path: &str, results: &[BenchmarkResult]) -> Result<(), std::io::Error> {
    let file = tokio::fs::File::create(path).await?;
    let mut writer = BufWriter::new(file);
    writer.write_all(b"seq,timestamp,duration_ms,status\n").await?;
    for result in results {
        let line = format!(
            "{},{},{:.3},{}\n",
            result.seq, result.timestamp, result.duration_ms, result.status
        );
        writer.write_all(line.as_bytes()).await?;
    }
    writer.flush().await?;
    Ok(())
}

/// Writes the summary and the full result log as one JSON document.
///
/// # Errors
///
/// Returns an error when the file cannot be created or written.
pub async fn export_json(
    path: &str,
    stats: &BenchmarkStats,
    results: &[BenchmarkResult],
) -> Result<(), std::io::Error> {
    let payload = JsonExport {
        summary: stats,
        results,
    };
    let json = serde_json::to_vec_pretty(&payload).map_err(std::io::Error::other)?;
    let file = tokio::fs::File::create(path).await?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&json).await?;
    writer.flush().await?;
    Ok(())
}
