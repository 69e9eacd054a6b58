use std::path::PathBuf;

use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

use crate::models::metric::MetricRecord;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// Reading, copying or writing a series file failed.
    #[snafu(display("I/O error on {}: {source}", path.display()))]
    Io {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// A series file is not a JSON array of metric records, or the records
    /// could not be serialized.
    #[snafu(display("Malformed series file {}: {source}", path.display()))]
    Json {
        path: PathBuf,
        source: serde_json::Error,
        backtrace: Backtrace,
    },

    /// A record carries a date that is not RFC 3339, so it cannot be ordered.
    #[snafu(display("Unparsable record date {date:?}: {source}"))]
    BadDate {
        date: String,
        source: chrono::ParseError,
        backtrace: Backtrace,
    },
}

#[async_trait]
pub trait DataSink {
    /// The type of output returned after a successful write operation.
    ///
    /// The JSON series store returns a [`MergeOutcome`](super::MergeOutcome)
    /// describing what was kept, replaced and backed up.
    type Output;

    /// Merges a freshly fetched window into the destination.
    ///
    /// # Arguments
    /// * `data` - The fetched records, in provider order.
    async fn write(&self, data: &[MetricRecord]) -> Result<Self::Output, SinkError>;
}
