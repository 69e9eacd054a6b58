//! Fetcher side of the index valuation tool.
//!
//! [`registry`] lists the tracked indices, [`providers`] talks to the two
//! remote endpoints, [`io`] keeps the per-index JSON series on disk, and
//! [`fetch`] ties them together one index at a time.

#[cfg(feature = "cli")]
pub mod cli;
pub mod errors;
pub mod fetch;
pub mod io;
pub mod models;
pub mod providers;
pub mod registry;

pub use errors::Error;
