//! Token-authenticated open API endpoint.

pub mod params;
pub mod provider;

pub use provider::ApiProvider;
