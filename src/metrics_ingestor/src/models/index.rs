//! Static description of a tracked market index.

use std::fmt;

/// Which upstream endpoint serves an index's metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Token-authenticated open API, returns a bounded date window.
    Api,
    /// Cookie-authenticated web endpoint, returns the full history.
    Web,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Api => f.write_str("api"),
            SourceKind::Web => f.write_str("web"),
        }
    }
}

/// One entry of the index registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexDescriptor {
    /// Provider-side index identifier (e.g. `"10000000905"`).
    pub code: &'static str,
    /// Human-readable display name, also part of every file name.
    pub name: &'static str,
    pub source: SourceKind,
}
