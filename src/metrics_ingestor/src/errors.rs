use thiserror::Error;

use crate::{
    io::SinkError,
    providers::{ProviderError, ProviderInitError},
    registry::UnknownIndex,
};

/// The unified error type for the `metrics_ingestor` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// An error originating from a data provider (e.g., API error, bad payload).
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// A provider could not be constructed from the configured credentials.
    #[error("Provider initialization error: {0}")]
    ProviderInit(#[from] ProviderInitError),

    /// An error originating from the series store (file I/O, malformed JSON).
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    /// An error related to configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] shared_utils::config::ConfigError),

    #[error(transparent)]
    UnknownIndex(#[from] UnknownIndex),

    /// A generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
