//! Per-index JSON time series on disk.
//!
//! A stored series is a JSON array of [`MetricRecord`]s, ascending by date.
//! Updating it is a backup-then-overwrite of the whole file: the previous file
//! is copied to `{file}.{run_stamp}`, the records older than the fetched window
//! are kept, and the fetched window replaces everything from its first date on.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared_utils::layout::{DataLayout, backup_file};
use snafu::ResultExt;
use tracing::{info, warn};

use crate::{
    io::sink::{BadDateSnafu, DataSink, IoSnafu, JsonSnafu, SinkError},
    models::{index::IndexDescriptor, metric::MetricRecord},
};

/// Reads a stored series. `Ok(None)` when the file does not exist.
pub fn load_series(path: &Path) -> Result<Option<Vec<MetricRecord>>, SinkError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).context(IoSnafu { path }),
    };
    serde_json::from_str(&text)
        .map(Some)
        .context(JsonSnafu { path })
}

/// Overwrites `path` with `records` as a compact JSON array.
pub fn save_series(path: &Path, records: &[MetricRecord]) -> Result<(), SinkError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context(IoSnafu { path: parent })?;
    }
    let bytes = serde_json::to_vec(records).context(JsonSnafu { path })?;
    fs::write(path, bytes).context(IoSnafu { path })
}

fn timestamp_of(record: &MetricRecord) -> Result<DateTime<Utc>, SinkError> {
    record.timestamp().context(BadDateSnafu {
        date: record.date.as_str(),
    })
}

/// Merges a fetched window into a stored series.
///
/// The window is sorted ascending by date (stable for equal dates). Stored
/// records dated strictly before the window's earliest record are kept in
/// their stored order; every other stored record is dropped, and the whole
/// window is appended. This is a hard cutoff: a stored record sharing a date
/// with the window is replaced, never merged field by field.
///
/// A stored record whose date does not parse is compared as text against the
/// window's earliest date string and logged; a fetched one is an error.
///
/// An empty window leaves the stored series untouched.
pub fn merge_window(
    stored: Vec<MetricRecord>,
    fetched: Vec<MetricRecord>,
) -> Result<Vec<MetricRecord>, SinkError> {
    let mut keyed = fetched
        .into_iter()
        .map(|r| timestamp_of(&r).map(|ts| (ts, r)))
        .collect::<Result<Vec<_>, _>>()?;
    keyed.sort_by_key(|(ts, _)| *ts);

    let Some((earliest, earliest_date)) = keyed.first().map(|(ts, r)| (*ts, r.date.clone()))
    else {
        return Ok(stored);
    };

    let mut merged = Vec::with_capacity(stored.len() + keyed.len());
    for record in stored {
        let older = match record.timestamp() {
            Ok(ts) => ts < earliest,
            Err(e) => {
                warn!(
                    date = %record.date,
                    error = %e,
                    "stored record has unparsable date, comparing as text"
                );
                record.date < earliest_date
            }
        };
        if older {
            merged.push(record);
        }
    }
    merged.extend(keyed.into_iter().map(|(_, r)| r));
    Ok(merged)
}

/// What a [`JsonSeriesStore::write`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// The data file that was (re)written.
    pub path: PathBuf,
    /// Where the previous file was copied, if there was one.
    pub backup: Option<PathBuf>,
    /// Stored records that survived the cutoff.
    pub kept: usize,
    /// Records taken from the fetched window.
    pub fetched: usize,
}

/// File-backed series for a single index.
#[derive(Debug, Clone)]
pub struct JsonSeriesStore {
    data_file: PathBuf,
    backup_file: PathBuf,
}

impl JsonSeriesStore {
    pub fn new(layout: &DataLayout, index: &IndexDescriptor, run_stamp: &str) -> Self {
        let data_file = layout.data_file(index.code, index.name);
        let backup_file = backup_file(&data_file, run_stamp);
        Self {
            data_file,
            backup_file,
        }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn backup_file(&self) -> &Path {
        &self.backup_file
    }

    /// Copies the current data file aside. `Ok(false)` when there is none yet.
    fn backup(&self) -> Result<bool, SinkError> {
        match fs::copy(&self.data_file, &self.backup_file) {
            Ok(_) => {
                info!(
                    from = %self.data_file.display(),
                    to = %self.backup_file.display(),
                    "backed up data file"
                );
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.data_file.display(), "data file does not exist yet");
                Ok(false)
            }
            Err(e) => Err(e).context(IoSnafu {
                path: &self.data_file,
            }),
        }
    }
}

#[async_trait]
impl DataSink for JsonSeriesStore {
    type Output = MergeOutcome;

    async fn write(&self, data: &[MetricRecord]) -> Result<MergeOutcome, SinkError> {
        let backed_up = self.backup()?;
        let stored = load_series(&self.data_file)?.unwrap_or_default();
        let merged = merge_window(stored, data.to_vec())?;
        save_series(&self.data_file, &merged)?;
        info!(path = %self.data_file.display(), records = merged.len(), "saved data file");

        Ok(MergeOutcome {
            path: self.data_file.clone(),
            backup: backed_up.then(|| self.backup_file.clone()),
            kept: merged.len() - data.len(),
            fetched: data.len(),
        })
    }
}
