//! Cookie-authenticated web endpoint backing the site's charts.
//!
//! Serves indices the open API does not cover yet and always returns the
//! full history.

pub mod params;
pub mod provider;

pub use provider::WebProvider;
