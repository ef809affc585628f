//! Input types shared across JSON Composer
//!
//! A composition run takes an ordered list of [`SourceGroup`]s, one per
//! named API. Each group holds (request, output) sample pairs captured from
//! example calls.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Samples
// ============================================================================

/// Which side of an example call a sample was captured from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleRole {
    /// The JSON sent to the API
    #[serde(alias = "input")]
    Request,
    /// The JSON the API answered with
    Output,
}

impl fmt::Display for SampleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleRole::Request => write!(f, "request"),
            SampleRole::Output => write!(f, "output"),
        }
    }
}

/// One unparsed JSON document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub role: SampleRole,
    pub text: String,
}

impl Sample {
    /// Create a sample
    pub fn new(role: SampleRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    /// Parse the sample text
    pub fn parse(&self) -> serde_json::Result<JsonValue> {
        serde_json::from_str(&self.text)
    }
}

/// A (request, output) pair from one example call
///
/// Blank text on either side means that side was not observed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplePair {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<Sample>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Sample>,
}

impl SamplePair {
    /// Create a pair from raw texts, treating blank text as absent
    pub fn new(request: impl Into<String>, output: impl Into<String>) -> Self {
        Self::from_options(Some(request.into()), Some(output.into()))
    }

    /// Create a pair from optional raw texts, treating blank text as absent
    pub fn from_options(request: Option<String>, output: Option<String>) -> Self {
        let observed = |text: Option<String>, role| {
            text.filter(|t| !t.trim().is_empty())
                .map(|t| Sample::new(role, t))
        };
        Self {
            request: observed(request, SampleRole::Request),
            output: observed(output, SampleRole::Output),
        }
    }

    /// Create a pair holding only an output sample
    pub fn output_only(output: impl Into<String>) -> Self {
        Self::from_options(None, Some(output.into()))
    }

    /// A pair is usable when at least one side was observed
    pub fn is_usable(&self) -> bool {
        self.request.is_some() || self.output.is_some()
    }

    /// Iterate over the observed samples, request first
    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.request.iter().chain(self.output.iter())
    }
}

/// All samples captured for one named API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceGroup {
    pub name: String,
    #[serde(default)]
    pub pairs: Vec<SamplePair>,
}

impl SourceGroup {
    /// Create an empty group
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pairs: Vec::new(),
        }
    }

    /// Add a pair (builder style)
    #[must_use]
    pub fn with_pair(mut self, pair: SamplePair) -> Self {
        self.pairs.push(pair);
        self
    }

    /// Add a pair
    pub fn push(&mut self, pair: SamplePair) {
        self.pairs.push(pair);
    }

    /// Number of pairs with at least one observed side
    pub fn usable_pairs(&self) -> usize {
        self.pairs.iter().filter(|p| p.is_usable()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_is_absent() {
        let pair = SamplePair::new("", "  ");
        assert!(pair.request.is_none());
        assert!(pair.output.is_none());
        assert!(!pair.is_usable());

        let pair = SamplePair::new("{}", "");
        assert!(pair.is_usable());
        assert_eq!(pair.samples().count(), 1);
    }

    #[test]
    fn test_usable_pairs() {
        let group = SourceGroup::new("Orders")
            .with_pair(SamplePair::new("{}", r#"{"id":1}"#))
            .with_pair(SamplePair::default())
            .with_pair(SamplePair::output_only("{}"));
        assert_eq!(group.pairs.len(), 3);
        assert_eq!(group.usable_pairs(), 2);
    }

    #[test]
    fn test_role_serde() {
        let role: SampleRole = serde_json::from_str("\"input\"").unwrap();
        assert_eq!(role, SampleRole::Request);
        assert_eq!(serde_json::to_string(&SampleRole::Output).unwrap(), "\"output\"");
    }
}
