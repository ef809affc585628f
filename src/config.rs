//! Engine configuration
//!
//! Every field has a default, so an empty YAML document is a valid config.
//!
//! ```yaml
//! similarity:
//!   threshold: 0.5
//!   name_weight: 0.4
//!   attribute_weight: 0.6
//! discovery:
//!   input_suffix: Input
//! output:
//!   format: gexf
//!   pretty: true
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Cross-graph similarity scoring
    #[serde(default)]
    pub similarity: SimilarityConfig,

    /// Per-group discovery
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Graph encoding
    #[serde(default)]
    pub output: OutputConfig,
}

impl EngineConfig {
    /// Validate all sections
    pub fn validate(&self) -> Result<()> {
        self.similarity.validate()?;
        self.discovery.validate()
    }
}

// ============================================================================
// Similarity
// ============================================================================

/// Weights and cutoff for similarity edges
///
/// The score of a concept pair is the weighted mean of its name similarity
/// and the Jaccard overlap of its attribute names. Pairs scoring at or above
/// `threshold` get an edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityConfig {
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    #[serde(default = "default_name_weight")]
    pub name_weight: f64,

    #[serde(default = "default_attribute_weight")]
    pub attribute_weight: f64,
}

fn default_threshold() -> f64 {
    0.5
}

fn default_name_weight() -> f64 {
    0.4
}

fn default_attribute_weight() -> f64 {
    0.6
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            name_weight: default_name_weight(),
            attribute_weight: default_attribute_weight(),
        }
    }
}

impl SimilarityConfig {
    /// Set the cutoff
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set both signal weights
    #[must_use]
    pub fn with_weights(mut self, name_weight: f64, attribute_weight: f64) -> Self {
        self.name_weight = name_weight;
        self.attribute_weight = attribute_weight;
        self
    }

    /// Weights scaled to sum to one, as (name, attribute)
    pub fn normalized_weights(&self) -> (f64, f64) {
        let total = self.name_weight + self.attribute_weight;
        (self.name_weight / total, self.attribute_weight / total)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if !(self.threshold > 0.0 && self.threshold <= 1.0) {
            return Err(Error::config(format!(
                "similarity.threshold must be in (0, 1], got {}",
                self.threshold
            )));
        }
        if self.name_weight < 0.0 || self.attribute_weight < 0.0 {
            return Err(Error::config("similarity weights cannot be negative"));
        }
        if self.name_weight + self.attribute_weight <= 0.0 {
            return Err(Error::config("similarity weights must have a positive sum"));
        }
        Ok(())
    }
}

// ============================================================================
// Discovery
// ============================================================================

/// Discovery settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Appended to the group name to name the request concept
    #[serde(default = "default_input_suffix")]
    pub input_suffix: String,
}

fn default_input_suffix() -> String {
    "Input".to_string()
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            input_suffix: default_input_suffix(),
        }
    }
}

impl DiscoveryConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.input_suffix.is_empty() {
            return Err(Error::config("discovery.input_suffix cannot be empty"));
        }
        Ok(())
    }
}

// ============================================================================
// Output
// ============================================================================

/// Encoded graph format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GraphFormat {
    /// GEXF 1.2 XML document
    #[default]
    Gexf,
    /// JSON node/edge document
    Json,
}

impl GraphFormat {
    /// MIME type of the encoded text
    pub fn content_type(&self) -> &'static str {
        match self {
            GraphFormat::Gexf => "application/xml",
            GraphFormat::Json => "application/json",
        }
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: GraphFormat,

    /// Indent the encoded document
    #[serde(default = "default_true")]
    pub pretty: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: GraphFormat::default(),
            pretty: true,
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Load and validate a config file (YAML or JSON)
pub fn load_config(path: impl AsRef<Path>) -> Result<EngineConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;
    load_config_from_str(&content)
}

/// Parse and validate a config document
pub fn load_config_from_str(text: &str) -> Result<EngineConfig> {
    let config: EngineConfig = if text.trim().is_empty() {
        EngineConfig::default()
    } else {
        serde_yaml::from_str(text)
            .map_err(|e| Error::config(format!("Failed to parse config: {e}")))?
    };
    config.validate()?;
    Ok(config)
}
