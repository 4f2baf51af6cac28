//! Showcase record persistence.
//!
//! The output directory exactly reflects the current run: the existing
//! directory is removed wholesale, recreated, and one JSON file is written
//! per record. The remove/create/write order is a hard guarantee; it is
//! what makes deleted or edited comments stop appearing.

use std::path::Path;

use tokio::fs;

use crate::error::{Result, ScrapeError};
use crate::progress::{ProgressCallback, ScrapeProgress, emit};
use crate::record::ShowcaseRecord;

/// Replace `root` with one `<author>.json` file per record.
///
/// Records are written in the order given, which is aggregation order.
/// Any filesystem failure surfaces as [`ScrapeError::Persistence`] and may
/// leave the directory partially replaced.
pub async fn write_records(
    root: &Path,
    records: &[ShowcaseRecord],
    on_progress: Option<&ProgressCallback>,
) -> Result<()> {
    match fs::remove_dir_all(root).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(ScrapeError::persistence(root, e.to_string())),
    }

    fs::create_dir_all(root)
        .await
        .map_err(|e| ScrapeError::persistence(root, e.to_string()))?;

    for record in records {
        let path = root.join(format!("{}.json", record.author));
        let mut body = serde_json::to_string_pretty(record)
            .map_err(|e| ScrapeError::persistence(&path, e.to_string()))?;
        body.push('\n');

        fs::write(&path, body)
            .await
            .map_err(|e| ScrapeError::persistence(&path, e.to_string()))?;

        emit(
            on_progress,
            ScrapeProgress::WroteRecord {
                author: record.author.clone(),
            },
        );
    }

    emit(
        on_progress,
        ScrapeProgress::WriteComplete {
            written: records.len(),
        },
    );

    Ok(())
}
