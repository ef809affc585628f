//! Schema discovery module
//!
//! Infers a concept graph from the JSON sample pairs of one source group.
//!
//! # Features
//!
//! - **Path Identity**: Objects reached through the same field chain share a concept
//! - **Array Collapsing**: Every element of an array of objects folds into one concept
//! - **Type Union**: Disagreeing primitive types merge to `mixed`
//! - **Optionality**: Keys missing from some samples are flagged optional
//! - **Null Handling**: `null` never overrides a known type, it marks the key nullable

mod inference;
mod types;

pub use inference::{discover, SchemaDiscoverer, INPUT_FIELD};
pub use types::{Attribute, Concept, ConceptGraph, ConceptId, Containment, ValueType};

#[cfg(test)]
mod tests;
