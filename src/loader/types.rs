//! Loader types
//!
//! Declarative manifest types for YAML/JSON parsing.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Manifest
// ============================================================================

/// Top-level manifest listing the source groups of one composition run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Manifest {
    /// Source groups, in composition order
    #[serde(default)]
    pub groups: Vec<GroupDefinition>,
}

/// One named API and its sample pairs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupDefinition {
    /// Group name (unique within the manifest)
    pub name: String,
    /// Sample pairs
    #[serde(default)]
    pub pairs: Vec<PairDefinition>,
}

// ============================================================================
// Pair Definition
// ============================================================================

/// One (request, output) pair
///
/// Each side is given either inline or as a file path relative to the
/// manifest. A string is taken as raw JSON text; any other value is the
/// document itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PairDefinition {
    #[serde(default, alias = "request")]
    pub input: Option<serde_json::Value>,
    #[serde(default, alias = "request_file")]
    pub input_file: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<serde_json::Value>,
    #[serde(default)]
    pub output_file: Option<PathBuf>,
}
