//! Cross-API composition module
//!
//! Unions the concept graphs of several source groups and links concepts
//! from different groups that look alike.
//!
//! # Features
//!
//! - **Provenance**: Every concept keeps the graph (and group name) it came from
//! - **Name Similarity**: Normalised edit distance between concept names
//! - **Attribute Overlap**: Jaccard index of attribute name sets
//! - **Candidate Index**: Pairs are looked up through shared attribute names
//! - **Stable Output**: Similarity edges are sorted by source order, then name

mod composer;
mod similarity;
mod types;

pub use composer::{compose, SimilarityComposer};
pub use similarity::{attribute_overlap, name_similarity, normalize_name};
pub use types::{ComposedGraph, ConceptRef, MatchBasis, SimilarityEdge};
