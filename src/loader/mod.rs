//! Source loader module
//!
//! Builds [`SourceGroup`](crate::types::SourceGroup)s from the outside world.
//!
//! # Overview
//!
//! The loader module provides:
//! - `digest_params` - Flat `sources[name][jsonDefs][i][input|output]` parameters
//! - `load_manifest` - YAML/JSON manifests with inline or file-backed samples

mod params;
mod parser;
mod types;

pub use params::{digest_params, MAX_PAIR_INDEX};
pub use parser::{load_manifest, load_manifest_from_str, resolve_manifest};
pub use types::{GroupDefinition, Manifest, PairDefinition};
