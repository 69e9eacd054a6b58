pub mod json_store;
pub mod sink;

pub use json_store::{JsonSeriesStore, MergeOutcome, load_series, merge_window, save_series};
pub use sink::{DataSink, SinkError};
