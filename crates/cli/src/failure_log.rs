use std::path::Path;

use resolver::{FailedTitle, Season};
use tokio::io::AsyncWriteExt;

/// One run's entry in the failure log.
fn render(timestamp: &str, year: i32, season: Season, failed: &[FailedTitle]) -> String {
    let mut entry = format!("{} - Year: {} - Season: {}\n", timestamp, year, season.label());
    for title in failed {
        entry.push_str(&format!("{} - {}\n", title.record, title.reason));
    }
    entry.push_str("-----\n");
    entry
}

/// Append the failed titles of a run to `path`, creating it if needed.
pub async fn append(
    path: &Path,
    year: i32,
    season: Season,
    failed: &[FailedTitle],
) -> std::io::Result<()> {
    let timestamp = chrono::Local::now()
        .format("%Y-%m-%d %H:%M:%S%.6f")
        .to_string();
    let entry = render(&timestamp, year, season, failed);

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(entry.as_bytes()).await?;
    file.flush().await?;

    tracing::info!(
        path = %path.display(),
        count = failed.len(),
        "Logged failed titles"
    );
    Ok(())
}
