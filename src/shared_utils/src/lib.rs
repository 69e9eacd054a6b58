//! Helpers shared by the fetcher and the reporters: credential loading,
//! environment lookups and the on-disk file naming convention.

pub mod config;
pub mod env;
pub mod layout;
