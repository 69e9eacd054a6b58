//! The fixed set of indices this tool tracks.
//!
//! Some indices are not available through the open API yet, so every entry
//! currently goes through the web endpoint.

use thiserror::Error;

use crate::models::index::{IndexDescriptor, SourceKind};

/// A requested code is not part of the registry.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown index code: {0}")]
pub struct UnknownIndex(pub String);

const fn web(code: &'static str, name: &'static str) -> IndexDescriptor {
    IndexDescriptor {
        code,
        name,
        source: SourceKind::Web,
    }
}

/// Registry in processing order.
pub static INDICES: &[IndexDescriptor] = &[
    web("10000000905", "中证500"),
    web("10000000016", "上证50"),
    web("10000000300", "沪深300"),
    web("10000399673", "创业板50"),
    web("10000399006", "创业板指"),
    web("10000000015", "红利指数"),
    web("10000399903", "中证100"),
    web("10000000922", "中证红利"),
    web("10000000925", "基本面50"),
    web("10000399324", "深证红利"),
    web("10000399550", "央视50"),
    web("10000399005", "中小板指"),
    web("10000399330", "深证100"),
    web("10000000009", "上证380"),
    web("10000000010", "上证180"),
    web("10010000010001", "恒生指数"),
    web("10010000010002", "国企指数"),
];

pub fn all() -> &'static [IndexDescriptor] {
    INDICES
}

pub fn lookup(code: &str) -> Option<&'static IndexDescriptor> {
    INDICES.iter().find(|d| d.code == code)
}

/// Narrows the registry to `codes`, keeping registry order.
///
/// An empty `codes` selects everything.
pub fn select(codes: &[String]) -> Result<Vec<IndexDescriptor>, UnknownIndex> {
    if codes.is_empty() {
        return Ok(INDICES.to_vec());
    }
    if let Some(unknown) = codes.iter().find(|c| lookup(c).is_none()) {
        return Err(UnknownIndex(unknown.clone()));
    }
    Ok(INDICES
        .iter()
        .filter(|d| codes.iter().any(|c| c == d.code))
        .copied()
        .collect())
}
