//! Shared driver for the per-index CSVs and the daily aggregate.
//!
//! For every index in registry order:
//! 1. load `{data}/{code}-{name}.json` (skip the index if it does not exist),
//! 2. keep the records carrying both PE and PB,
//! 3. let the [`Analysis`] derive its stat columns,
//! 4. write `{output}/{code}-{name}.csv`,
//! 5. remember the last row for the aggregate.
//!
//! The aggregate `{output}/aggregated-{YYYYMMDD}.csv` is written once at the end,
//! header included even when no index produced a row.

use std::{fmt::Display, fs, path::PathBuf};

use anyhow::Context;
use chrono::{NaiveDate, TimeZone};
use metrics_ingestor::models::index::IndexDescriptor;
use shared_utils::layout::DataLayout;
use tracing::info;

use crate::{
    dates::format_local_date,
    series::{ValuationPoint, load_points},
};

/// Leading columns of every per-index CSV.
pub const POINT_HEADERS: [&str; 5] = ["date", "close_point", "market_value", "pe", "pb"];

/// Leading columns of every aggregate CSV.
pub const AGGREGATE_PREFIX: [&str; 8] = [
    "date",
    "stock_code",
    "stock_code_name",
    "close_point",
    "market_value",
    "pe",
    "pb",
    "ps",
];

/// A statistic derived from a filtered series.
pub trait Analysis {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Column names for the values [`compute`](Self::compute) returns per row.
    fn stat_headers(&self) -> &'static [&'static str];

    /// One row of stat values per point, in the same order as `points`.
    fn compute(&self, points: &[ValuationPoint]) -> Vec<Vec<f64>>;

    /// Full per-index CSV header.
    fn report_headers(&self) -> Vec<&'static str> {
        POINT_HEADERS
            .iter()
            .chain(self.stat_headers())
            .copied()
            .collect()
    }

    /// Full aggregate CSV header.
    fn aggregate_headers(&self) -> Vec<&'static str> {
        AGGREGATE_PREFIX
            .iter()
            .chain(self.stat_headers())
            .copied()
            .collect()
    }
}

/// What a [`run_report`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    /// Per-index CSVs written.
    pub reports: Vec<PathBuf>,
    /// Indices skipped because their data file does not exist.
    pub missing: Vec<String>,
    /// The aggregate CSV.
    pub aggregate: PathBuf,
    /// Rows in the aggregate CSV, header excluded.
    pub aggregate_rows: usize,
}

fn field(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn point_fields<Tz>(point: &ValuationPoint, tz: &Tz) -> anyhow::Result<Vec<String>>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    Ok(vec![
        format_local_date(&point.date, tz)?,
        field(point.close_point),
        field(point.market_value),
        point.pe.to_string(),
        point.pb.to_string(),
    ])
}

/// Outcome of [`report_index`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexReport {
    /// No data file; nothing was written.
    Missing,
    /// The CSV was written.
    Written {
        /// Path of the per-index CSV.
        path: PathBuf,
        /// Aggregate row for the last complete record, if any.
        last: Option<Vec<String>>,
    },
}

/// Writes the CSV for one index and returns its aggregate row.
///
/// When no record is complete a header-only CSV is written and `last` is `None`.
pub fn report_index<A, Tz>(
    analysis: &A,
    layout: &DataLayout,
    index: &IndexDescriptor,
    tz: &Tz,
) -> anyhow::Result<IndexReport>
where
    A: Analysis + ?Sized,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let data_file = layout.data_file(index.code, index.name);
    let Some(points) = load_points(&data_file)? else {
        info!(path = %data_file.display(), "data file does not exist");
        return Ok(IndexReport::Missing);
    };
    let stats = analysis.compute(&points);

    let path = layout.report_file(index.code, index.name);
    let mut writer =
        csv::Writer::from_path(&path).with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(analysis.report_headers())?;

    let last = points
        .iter()
        .zip(&stats)
        .try_fold(None, |_, (point, values)| -> anyhow::Result<_> {
            let mut row = point_fields(point, tz)?;
            row.extend(values.iter().map(f64::to_string));
            writer.write_record(&row)?;
            Ok(Some((point, values)))
        })?;
    writer.flush()?;
    info!(path = %path.display(), rows = points.len(), "wrote report");

    let last = match last {
        Some((point, values)) => Some(aggregate_row(point, values, index, tz)?),
        None => None,
    };
    Ok(IndexReport::Written { path, last })
}

fn aggregate_row<Tz>(
    point: &ValuationPoint,
    values: &[f64],
    index: &IndexDescriptor,
    tz: &Tz,
) -> anyhow::Result<Vec<String>>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut row = vec![
        format_local_date(&point.date, tz)?,
        index.code.to_string(),
        index.name.to_string(),
        field(point.close_point),
        field(point.market_value),
        point.pe.to_string(),
        point.pb.to_string(),
        field(point.ps),
    ];
    row.extend(values.iter().map(f64::to_string));
    Ok(row)
}

/// Runs `analysis` over `indices` and writes the aggregate for `today`.
///
/// Dates are rendered as calendar days in `tz`. A malformed data file aborts
/// the run.
pub fn run_report<A, Tz>(
    analysis: &A,
    layout: &DataLayout,
    indices: &[IndexDescriptor],
    tz: &Tz,
    today: NaiveDate,
) -> anyhow::Result<ReportSummary>
where
    A: Analysis + ?Sized,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    fs::create_dir_all(&layout.output_dir)
        .with_context(|| format!("creating {}", layout.output_dir.display()))?;

    let mut reports = Vec::new();
    let mut missing = Vec::new();
    let mut aggregated = Vec::new();

    for index in indices {
        info!(report = analysis.name(), code = index.code, name = index.name, "processing");
        let outcome = report_index(analysis, layout, index, tz).with_context(|| {
            format!("{} report for {} {}", analysis.name(), index.code, index.name)
        })?;
        match outcome {
            IndexReport::Missing => missing.push(index.code.to_string()),
            IndexReport::Written { path, last } => {
                reports.push(path);
                aggregated.extend(last);
            }
        }
    }

    let aggregate = layout.aggregate_file(today);
    info!(path = %aggregate.display(), "aggregate to file");
    let mut writer = csv::Writer::from_path(&aggregate)
        .with_context(|| format!("creating {}", aggregate.display()))?;
    writer.write_record(analysis.aggregate_headers())?;
    for row in &aggregated {
        writer.write_record(row)?;
    }
    writer.flush()?;

    Ok(ReportSummary {
        reports,
        missing,
        aggregate,
        aggregate_rows: aggregated.len(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use metrics_ingestor::models::index::SourceKind;

    use super::*;

    /// Echoes the PE so expected rows are easy to read.
    struct EchoPe;

    impl Analysis for EchoPe {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn stat_headers(&self) -> &'static [&'static str] {
            &["pe_echo"]
        }

        fn compute(&self, points: &[ValuationPoint]) -> Vec<Vec<f64>> {
            points.iter().map(|p| vec![p.pe]).collect()
        }
    }

    const INDEX: IndexDescriptor = IndexDescriptor {
        code: "10000000016",
        name: "上证50",
        source: SourceKind::Web,
    };

    #[test]
    fn headers_prefix_stat_columns() {
        assert_eq!(
            EchoPe.report_headers(),
            ["date", "close_point", "market_value", "pe", "pb", "pe_echo"]
        );
        assert_eq!(EchoPe.aggregate_headers().len(), 9);
        assert_eq!(EchoPe.aggregate_headers()[8], "pe_echo");
    }

    #[test]
    fn absent_values_are_empty_fields() {
        assert_eq!(field(None), "");
        assert_eq!(field(Some(12.5)), "12.5");
        assert_eq!(field(Some(100.0)), "100");
    }

    #[test]
    fn last_complete_record_becomes_the_aggregate_row() {
        let dir = tempfile::tempdir().unwrap();
        let layout = DataLayout::new(dir.path().join("data"), dir.path().join("out"));
        fs::create_dir_all(&layout.data_dir).unwrap();
        fs::create_dir_all(&layout.output_dir).unwrap();
        fs::write(
            layout.data_file(INDEX.code, INDEX.name),
            r#"[
                {"date":"2023-01-01T00:00:00.000Z","close_point":2500.5,"pe_ttm":{"weightedAvg":9.5},"pb":{"weightedAvg":1.1}},
                {"date":"2023-01-02T00:00:00.000Z","pe_ttm":{"weightedAvg":9.7},"pb":{"weightedAvg":1.2},"ps_ttm":{"weightedAvg":1.4}},
                {"date":"2023-01-03T00:00:00.000Z","pe_ttm":{"weightedAvg":9.9}}
            ]"#,
        )
        .unwrap();

        let outcome = report_index(&EchoPe, &layout, &INDEX, &Utc).unwrap();
        let IndexReport::Written { path, last } = outcome else {
            panic!("data file exists");
        };
        assert_eq!(path, layout.report_file(INDEX.code, INDEX.name));
        assert_eq!(
            last.unwrap(),
            ["2023-01-02", "10000000016", "上证50", "", "", "9.7", "1.2", "1.4", "9.7"]
        );

        let csv = fs::read_to_string(layout.report_file(INDEX.code, INDEX.name)).unwrap();
        assert_eq!(
            csv,
            "date,close_point,market_value,pe,pb,pe_echo\n\
             2023-01-01,2500.5,,9.5,1.1,9.5\n\
             2023-01-02,,,9.7,1.2,9.7\n"
        );
    }

    #[test]
    fn no_complete_records_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let layout = DataLayout::new(dir.path(), dir.path());
        fs::write(
            layout.data_file(INDEX.code, INDEX.name),
            r#"[{"date":"2023-01-03T00:00:00.000Z","pe_ttm":{"weightedAvg":9.9}}]"#,
        )
        .unwrap();

        let outcome = report_index(&EchoPe, &layout, &INDEX, &Utc).unwrap();
        assert!(matches!(outcome, IndexReport::Written { last: None, .. }));
        let csv = fs::read_to_string(layout.report_file(INDEX.code, INDEX.name)).unwrap();
        assert_eq!(csv, "date,close_point,market_value,pe,pb,pe_echo\n");
    }

    #[test]
    fn missing_data_file_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let layout = DataLayout::new(dir.path(), dir.path());
        let outcome = report_index(&EchoPe, &layout, &INDEX, &Utc).unwrap();
        assert_eq!(outcome, IndexReport::Missing);
        assert!(!layout.report_file(INDEX.code, INDEX.name).exists());
    }

    #[test]
    fn malformed_data_file_fails_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let layout = DataLayout::new(dir.path(), dir.path().join("out"));
        fs::write(layout.data_file(INDEX.code, INDEX.name), "{not json").unwrap();

        let today = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let err = run_report(&EchoPe, &layout, &[INDEX], &Utc, today).unwrap_err();
        assert!(format!("{err:#}").contains("10000000016"));
    }
}
