use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::model::Schedule;

/// Snapshot layout version; older or newer files are rejected on load.
pub const SNAPSHOT_VERSION: &str = "1.0";

const SNAPSHOT_FILE: &str = "cronograma.json";

#[derive(Serialize, Deserialize)]
struct SnapshotFile {
    version: String,
    saved_at: DateTime<Utc>,
    schedule: Schedule,
}

/// Metadata about a stored snapshot, read without keeping the schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotInfo {
    pub imported_at: DateTime<Utc>,
    pub saved_at: DateTime<Utc>,
    pub source_file: Option<String>,
    pub version: String,
    pub size_kb: u64,
}

/// Platform data directory location for the snapshot.
pub fn default_snapshot_path() -> PathBuf {
    ProjectDirs::from("", "", "cronograma")
        .map(|dirs| dirs.data_dir().join(SNAPSHOT_FILE))
        .unwrap_or_else(|| PathBuf::from(SNAPSHOT_FILE))
}

/// Save a schedule as a JSON snapshot, replacing any previous one.
pub fn save_snapshot(schedule: &Schedule, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = SnapshotFile {
        version: SNAPSHOT_VERSION.to_string(),
        saved_at: Utc::now(),
        schedule: schedule.clone(),
    };
    let json = serde_json::to_string_pretty(&file)?;

    // Write beside the target and rename so readers never see a partial file.
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;

    info!(
        path = %path.display(),
        categories = schedule.categories.len(),
        tasks = schedule.summary.total_tasks,
        "Schedule snapshot saved"
    );
    Ok(())
}

/// Load a snapshot verbatim.
pub fn load_snapshot(path: &Path) -> Result<Schedule> {
    Ok(read_snapshot(path)?.schedule)
}

pub fn snapshot_exists(path: &Path) -> bool {
    read_snapshot(path).is_ok()
}

/// Remove the stored snapshot; a missing file is not an error.
pub fn clear_snapshot(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            info!(path = %path.display(), "Schedule snapshot removed");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

pub fn snapshot_info(path: &Path) -> Result<SnapshotInfo> {
    let size = fs::metadata(path).map_err(|_| Error::NoSnapshot(path.to_path_buf()))?.len();
    let file = read_snapshot(path)?;
    Ok(SnapshotInfo {
        imported_at: file.schedule.imported_at,
        saved_at: file.saved_at,
        source_file: file.schedule.source_file,
        version: file.version,
        size_kb: (size + 512) / 1024,
    })
}

fn read_snapshot(path: &Path) -> Result<SnapshotFile> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::NoSnapshot(path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };

    // Check the version before decoding the schedule so layout changes
    // surface as a version error rather than a decode error.
    #[derive(Deserialize)]
    struct Header {
        version: String,
    }
    let header: Header = serde_json::from_str(&json)?;
    if header.version != SNAPSHOT_VERSION {
        warn!(found = %header.version, "Ignoring snapshot with incompatible version");
        return Err(Error::SnapshotVersion {
            found: header.version,
            expected: SNAPSHOT_VERSION.to_string(),
        });
    }

    Ok(serde_json::from_str(&json)?)
}
