//! Composed graph types

use crate::schema::{Concept, ConceptGraph, ConceptId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A concept addressed across graphs: (graph position, concept id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConceptRef {
    /// Position of the owning graph in the composition input
    pub graph: usize,
    pub concept: ConceptId,
}

impl ConceptRef {
    pub fn new(graph: usize, concept: ConceptId) -> Self {
        Self { graph, concept }
    }
}

/// Which signal carried a similarity match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchBasis {
    /// Names alone reach the threshold
    Name,
    /// Attribute overlap alone reaches the threshold
    Attributes,
    /// Both reach it, or only their combination does
    NameAndAttributes,
}

impl fmt::Display for MatchBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchBasis::Name => write!(f, "name"),
            MatchBasis::Attributes => write!(f, "attributes"),
            MatchBasis::NameAndAttributes => write!(f, "name_and_attributes"),
        }
    }
}

/// Scored candidate correspondence between concepts of different graphs
///
/// `source` always belongs to the earlier graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityEdge {
    pub source: ConceptRef,
    pub target: ConceptRef,
    /// Weighted combination of the two signals
    pub score: f64,
    pub name_score: f64,
    pub attribute_score: f64,
    pub basis: MatchBasis,
}

/// Union of all concept graphs plus the similarity edges between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedGraph {
    graphs: Vec<ConceptGraph>,
    similarities: Vec<SimilarityEdge>,
}

impl ComposedGraph {
    pub(crate) fn new(graphs: Vec<ConceptGraph>, similarities: Vec<SimilarityEdge>) -> Self {
        Self {
            graphs,
            similarities,
        }
    }

    /// Input graphs, in composition order
    pub fn graphs(&self) -> &[ConceptGraph] {
        &self.graphs
    }

    /// Similarity edges, in stable order
    pub fn similarities(&self) -> &[SimilarityEdge] {
        &self.similarities
    }

    /// Graph discovered for a group
    pub fn graph(&self, source: &str) -> Option<&ConceptGraph> {
        self.graphs.iter().find(|g| g.source() == source)
    }

    /// Resolve a concept reference
    pub fn concept(&self, r: ConceptRef) -> Option<&Concept> {
        self.graphs.get(r.graph).and_then(|g| g.concept(r.concept))
    }

    /// Group name a reference belongs to
    pub fn source_of(&self, r: ConceptRef) -> Option<&str> {
        self.graphs.get(r.graph).map(ConceptGraph::source)
    }

    /// Similarity edges touching a named concept of a named group
    pub fn similarities_of(&self, source: &str, concept: &str) -> Vec<&SimilarityEdge> {
        let matches = |r: ConceptRef| {
            self.source_of(r) == Some(source)
                && self.concept(r).is_some_and(|c| c.name == concept)
        };
        self.similarities
            .iter()
            .filter(|e| matches(e.source) || matches(e.target))
            .collect()
    }

    /// Total concepts across graphs
    pub fn concept_count(&self) -> usize {
        self.graphs.iter().map(ConceptGraph::len).sum()
    }

    /// Total primitive attributes across graphs
    pub fn attribute_count(&self) -> usize {
        self.graphs.iter().map(ConceptGraph::attribute_count).sum()
    }

    /// Total containment edges across graphs
    pub fn containment_count(&self) -> usize {
        self.graphs.iter().map(ConceptGraph::containment_count).sum()
    }

    /// Number of similarity edges
    pub fn similarity_count(&self) -> usize {
        self.similarities.len()
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
