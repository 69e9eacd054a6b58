//! Fetch loop: one provider request and one store merge per index.

use std::fs;

use tracing::{error, info};

use crate::{
    errors::Error,
    io::{DataSink, JsonSeriesStore, MergeOutcome},
    models::index::IndexDescriptor,
    providers::{DataProvider, ProviderInitError},
};
use shared_utils::layout::DataLayout;

/// Result of updating a single index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The endpoint returned nothing; no file was touched.
    NoData,
    Updated(MergeOutcome),
}

/// Per-run tally, logged at the end of `lxr-fetch`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FetchSummary {
    pub updated: usize,
    pub no_data: usize,
    /// Codes of indices whose update failed.
    pub failed: Vec<String>,
}

/// Downloads the metrics window for `index` and merges it into `sink`.
///
/// Safe to call repeatedly and independently per index: every call issues one
/// request and, when data came back, performs one backup-and-overwrite.
pub async fn download_metric<P, S>(
    provider: &P,
    sink: &S,
    index: &IndexDescriptor,
) -> Result<FetchOutcome, Error>
where
    P: DataProvider + ?Sized,
    S: DataSink<Output = MergeOutcome> + ?Sized,
{
    info!(code = index.code, name = index.name, source = %index.source, "downloading");
    let window = provider.fetch_metrics(index).await?;
    info!(code = index.code, records = window.len(), "download success");

    if window.is_empty() {
        error!(code = index.code, name = index.name, "no data returned, skipping update");
        return Ok(FetchOutcome::NoData);
    }

    let outcome = sink.write(&window).await?;
    Ok(FetchOutcome::Updated(outcome))
}

/// Updates every index in `indices`, in order.
///
/// `make_provider` picks the endpoint for an index. A failure for one index is
/// logged and recorded in the summary; the loop moves on to the next one.
/// Only failing to create the data folder aborts the run.
pub async fn fetch_all<F>(
    mut make_provider: F,
    layout: &DataLayout,
    indices: &[IndexDescriptor],
    run_stamp: &str,
) -> Result<FetchSummary, Error>
where
    F: FnMut(&IndexDescriptor) -> Result<Box<dyn DataProvider + Send + Sync>, ProviderInitError>,
{
    fs::create_dir_all(&layout.data_dir)?;
    let mut summary = FetchSummary::default();

    for index in indices {
        let result = match make_provider(index) {
            Ok(provider) => {
                let store = JsonSeriesStore::new(layout, index, run_stamp);
                download_metric(provider.as_ref(), &store, index).await
            }
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(FetchOutcome::Updated(outcome)) => {
                info!(
                    code = index.code,
                    kept = outcome.kept,
                    fetched = outcome.fetched,
                    "index updated"
                );
                summary.updated += 1;
            }
            Ok(FetchOutcome::NoData) => summary.no_data += 1,
            Err(e) => {
                error!(code = index.code, name = index.name, error = %e, "index update failed");
                summary.failed.push(index.code.to_string());
            }
        }
    }

    Ok(summary)
}
