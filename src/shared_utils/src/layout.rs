//! File naming convention shared by the fetcher and the reporters.
//!
//! Each index is addressed purely by `{code}-{name}`; there is no separate
//! lookup table on disk.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, TimeZone};

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_OUTPUT_DIR: &str = "./output";

/// Roots for stored series and generated reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for DataLayout {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR, DEFAULT_OUTPUT_DIR)
    }
}

impl DataLayout {
    pub fn new(data_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// `{data_dir}/{code}-{name}.json`
    pub fn data_file(&self, code: &str, name: &str) -> PathBuf {
        self.data_dir.join(format!("{code}-{name}.json"))
    }

    /// `{output_dir}/{code}-{name}.csv`
    pub fn report_file(&self, code: &str, name: &str) -> PathBuf {
        self.output_dir.join(format!("{code}-{name}.csv"))
    }

    /// `{output_dir}/aggregated-{YYYYMMDD}.csv`
    pub fn aggregate_file(&self, day: NaiveDate) -> PathBuf {
        self.output_dir
            .join(format!("aggregated-{}.csv", day.format("%Y%m%d")))
    }
}

/// Appends `.{stamp}` to a data file path.
pub fn backup_file(data_file: &Path, stamp: &str) -> PathBuf {
    let mut name = data_file.as_os_str().to_os_string();
    name.push(".");
    name.push(stamp);
    PathBuf::from(name)
}

/// Compact `YYYYMMDDHHMMSS` stamp identifying one fetch run.
pub fn run_stamp<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%Y%m%d%H%M%S").to_string()
}
