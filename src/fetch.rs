use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Instant;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::{info, warn};
use url::Url;

const EXPORT_ENDPOINT: &str = "https://www.imdb.com/list/export";

static USER_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ur\d{6,}$").expect("Invalid user ID regex"));

/// Build the export URL for a user's check-in list. The user ID must look
/// like an IMDb account ID (`ur` followed by at least six digits).
pub fn export_url(user_id: &str) -> Result<Url> {
    if !USER_ID_RE.is_match(user_id) {
        anyhow::bail!("Invalid IMDb user ID '{user_id}' (expected something like ur0123456)");
    }

    let mut url = Url::parse(EXPORT_ENDPOINT)?;
    url.query_pairs_mut()
        .append_pair("list_id", "checkins")
        .append_pair("author_id", user_id);
    Ok(url)
}

/// Download the check-in export for `user_id` into `data_dir`, returning the
/// path of the written file. No retries; a failed fetch is fatal for the run.
pub fn download_export(user_id: &str, data_dir: &Path) -> Result<PathBuf> {
    let start_time = Instant::now();
    let url = export_url(user_id)?;
    info!(action = "start", component = "export_download", user_id, url = %url, "Downloading check-in export");

    fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory {data_dir:?}"))?;
    let dest = data_dir.join(format!("{user_id}.csv"));

    let response = reqwest::blocking::get(url).context("Failed to fetch check-in export")?;
    if !response.status().is_success() {
        anyhow::bail!("Export download failed with status {}", response.status());
    }
    let body = response
        .text()
        .context("Failed to read export response body")?;
    fs::write(&dest, body).with_context(|| format!("Failed to write export to {dest:?}"))?;

    let fetch_time = start_time.elapsed();
    info!(
        action = "complete",
        component = "export_download",
        path = ?dest,
        duration_ms = fetch_time.as_millis(),
        "Check-in export downloaded"
    );
    Ok(dest)
}

/// Best-effort removal of a downloaded export file.
pub fn remove_export(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        warn!(action = "cleanup", component = "export_download", path = ?path, error = %e, "Failed to remove downloaded export");
    }
}
