//! File-backed schedule record source.
//!
//! Reads a JSON array of [`ScheduleRecord`] on every fetch so edits to the
//! file show up on the next window change. There is no caching and no
//! retry; callers keep only the result for the latest window.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};
use crate::models::{ScheduleRecord, Window};

/// Default record file name inside the data directory.
pub const DEFAULT_RECORDS_FILE: &str = "records.json";

/// Schedule records stored as JSON on disk.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every record in the file.
    ///
    /// A missing file is treated as an empty schedule.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::RecordSource` if the file cannot be read and
    /// `CoreError::Parse` if it is not a JSON array of records.
    pub async fn load_all(&self) -> CoreResult<Vec<ScheduleRecord>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = %self.path.display(), "record file not found, using empty schedule");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(CoreError::RecordSource {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        serde_json::from_str(&contents).map_err(|e| CoreError::Parse {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Records of `employee_id` overlapping `window`, sorted by start time.
    pub async fn fetch(&self, employee_id: &str, window: &Window) -> CoreResult<Vec<ScheduleRecord>> {
        let mut records: Vec<ScheduleRecord> = self
            .load_all()
            .await?
            .into_iter()
            .filter(|r| r.employee_id == employee_id && window.overlaps(r.start_time, r.end_time))
            .collect();
        records.sort_by_key(|r| r.start_time);

        tracing::debug!(
            employee_id,
            start = %window.start,
            end = %window.end,
            count = records.len(),
            "fetched schedule records"
        );
        Ok(records)
    }
}
