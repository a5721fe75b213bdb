use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::dates;
use crate::error::InputError;
use crate::record::CheckinRecord;

/// Columns a genuine check-in export is expected to carry. The validity
/// predicate only requires more than one of them to be present, so older
/// export layouts with fewer columns still pass.
const RECOGNIZED_COLUMNS: &[&str] = &[
    "position",
    "const",
    "created",
    "modified",
    "description",
    "Title",
    "Title type",
    "Directors",
    "You rated",
    "IMDb Rating",
    "Runtime (mins)",
    "Year",
    "Genres",
    "Num. Votes",
    "Release Date",
    "URL",
];

/// Header validity predicate: an export is usable only when its header has
/// more than one recognized column. An error page saved as CSV or a
/// header-only file fails here, before any statistics run.
pub fn validate_header(headers: &csv::StringRecord) -> Result<(), InputError> {
    let recognized = headers
        .iter()
        .filter(|h| RECOGNIZED_COLUMNS.contains(&h.trim()))
        .count();
    if recognized > 1 {
        Ok(())
    } else {
        Err(InputError::UnusableExport { columns: recognized })
    }
}

/// Read and order the check-in rows from an export file. Rows that fail to
/// deserialize are skipped with a warning; the surviving rows are sorted by
/// position, descending, before hand-off to the aggregator.
pub fn read_checkins(path: &Path) -> Result<Vec<CheckinRecord>> {
    let start_time = Instant::now();
    info!(action = "start", component = "csv_read", path = ?path, "Reading check-in export");

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open check-in export at {path:?}"))?;

    validate_header(reader.headers().context("Failed to read export header")?)?;

    let mut records: Vec<CheckinRecord> = Vec::new();
    let mut skipped = 0u32;
    for result in reader.deserialize::<CheckinRecord>() {
        match result {
            Ok(record) => records.push(record),
            Err(err) => {
                skipped += 1;
                warn!(action = "skip_row", component = "csv_read", error = %err, "Skipping malformed row");
            }
        }
    }

    records.sort_by(|a, b| b.position.cmp(&a.position));

    let read_time = start_time.elapsed();
    info!(
        action = "complete",
        component = "csv_read",
        row_count = records.len(),
        skipped_rows = skipped,
        duration_ms = read_time.as_millis(),
        "Check-in export read"
    );
    Ok(records)
}

/// Earliest and latest check-in dates plus the number of days between them,
/// from the export's "created" column. `None` when no row carries a
/// parseable date.
pub fn checkin_date_range(records: &[CheckinRecord]) -> Option<(NaiveDate, NaiveDate, i64)> {
    let mut earliest: Option<NaiveDate> = None;
    let mut latest: Option<NaiveDate> = None;

    for record in records {
        let Some(date) = dates::parse_created(&record.created) else {
            continue;
        };
        earliest = Some(earliest.map_or(date, |e| e.min(date)));
        latest = Some(latest.map_or(date, |l| l.max(date)));
    }

    match (earliest, latest) {
        (Some(earliest), Some(latest)) => {
            let days_between = (latest - earliest).num_days();
            Some((earliest, latest, days_between))
        }
        _ => {
            warn!(
                action = "complete",
                component = "date_range",
                "No parseable check-in dates found"
            );
            None
        }
    }
}
