//! Core library for notelink: wikilink scanning and rename propagation
//! across a vault of markdown notes.
//!
//! The pipeline, leaves first: skip-region detection ([`scan::regions`]),
//! link extraction ([`scan::extractor`]), vault scanning and reverse
//! indexing ([`scan`]), and rename planning/application ([`rename`]).

pub mod config;
pub mod frontmatter;
pub mod rename;
pub mod scan;
pub mod vault;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
