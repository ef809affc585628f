//! Similarity composition over discovered concept graphs

use super::similarity::{attribute_overlap, name_similarity, normalize_name};
use super::types::{ComposedGraph, ConceptRef, MatchBasis, SimilarityEdge};
use crate::config::SimilarityConfig;
use crate::error::{Error, Result};
use crate::schema::{ConceptGraph, ConceptId};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Per-concept data the scorer needs
struct Profile {
    name: String,
    attributes: BTreeSet<String>,
}

/// Composes concept graphs and emits similarity edges between them
#[derive(Debug, Clone, Default)]
pub struct SimilarityComposer {
    config: SimilarityConfig,
}

impl SimilarityComposer {
    /// Create a composer with default weights and threshold
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a composer from explicit settings
    pub fn with_config(config: SimilarityConfig) -> Self {
        Self { config }
    }

    /// Current settings
    pub fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    /// Union the graphs and link similar concepts across them
    pub fn compose(&self, graphs: Vec<ConceptGraph>) -> Result<ComposedGraph> {
        if graphs.is_empty() {
            return Err(Error::NoGraphs);
        }
        self.config.validate()?;

        let mut seen = HashSet::new();
        for graph in &graphs {
            if !seen.insert(graph.source()) {
                return Err(Error::DuplicateGroup {
                    group: graph.source().to_string(),
                });
            }
        }

        let profiles: Vec<Vec<Profile>> = graphs
            .iter()
            .map(|g| {
                g.concepts()
                    .iter()
                    .map(|c| Profile {
                        name: c.name.clone(),
                        attributes: c.attributes.iter().map(|a| normalize_name(&a.name)).collect(),
                    })
                    .collect()
            })
            .collect();

        let candidates = self.candidate_pairs(&profiles);
        let mut edges: Vec<SimilarityEdge> = candidates
            .into_iter()
            .filter_map(|(a, b)| self.score(&profiles, a, b))
            .collect();

        let name = |r: ConceptRef| profiles[r.graph][r.concept.0].name.as_str();
        edges.sort_by(|x, y| {
            (x.source.graph, name(x.source), x.source.concept)
                .cmp(&(y.source.graph, name(y.source), y.source.concept))
                .then_with(|| {
                    (x.target.graph, name(x.target), x.target.concept).cmp(&(
                        y.target.graph,
                        name(y.target),
                        y.target.concept,
                    ))
                })
        });

        let composed = ComposedGraph::new(graphs, edges);
        tracing::info!(
            graphs = composed.graphs().len(),
            concepts = composed.concept_count(),
            similarities = composed.similarity_count(),
            "Composed concept graphs"
        );
        Ok(composed)
    }

    /// Pairs of concepts from different graphs worth scoring
    ///
    /// When the name weight alone cannot reach the threshold, a pair with no
    /// shared attribute can never qualify, so only pairs found through the
    /// attribute-name index are returned. Otherwise every cross-graph pair is.
    fn candidate_pairs(&self, profiles: &[Vec<Profile>]) -> BTreeSet<(ConceptRef, ConceptRef)> {
        let (name_weight, _) = self.config.normalized_weights();
        let mut pairs = BTreeSet::new();

        if name_weight >= self.config.threshold {
            let all: Vec<ConceptRef> = refs(profiles).collect();
            for (i, a) in all.iter().enumerate() {
                for b in &all[i + 1..] {
                    if a.graph != b.graph {
                        pairs.insert((*a, *b));
                    }
                }
            }
            return pairs;
        }

        let mut index: BTreeMap<&str, Vec<ConceptRef>> = BTreeMap::new();
        for r in refs(profiles) {
            for attribute in &profiles[r.graph][r.concept.0].attributes {
                index.entry(attribute.as_str()).or_default().push(r);
            }
        }

        for bucket in index.values() {
            for (i, a) in bucket.iter().enumerate() {
                for b in &bucket[i + 1..] {
                    if a.graph != b.graph {
                        let (lo, hi) = if a < b { (*a, *b) } else { (*b, *a) };
                        pairs.insert((lo, hi));
                    }
                }
            }
        }
        pairs
    }

    /// Score one pair, returning an edge if it reaches the threshold
    fn score(&self, profiles: &[Vec<Profile>], a: ConceptRef, b: ConceptRef) -> Option<SimilarityEdge> {
        let pa = &profiles[a.graph][a.concept.0];
        let pb = &profiles[b.graph][b.concept.0];

        let (name_weight, attribute_weight) = self.config.normalized_weights();
        let name_score = name_similarity(&pa.name, &pb.name);
        let attribute_score = attribute_overlap(&pa.attributes, &pb.attributes);
        let score = name_weight * name_score + attribute_weight * attribute_score;

        if score < self.config.threshold {
            return None;
        }

        let threshold = self.config.threshold;
        let basis = match (name_score >= threshold, attribute_score >= threshold) {
            (true, false) => MatchBasis::Name,
            (false, true) => MatchBasis::Attributes,
            _ => MatchBasis::NameAndAttributes,
        };

        tracing::debug!(
            source = %pa.name,
            target = %pb.name,
            score,
            %basis,
            "Similarity edge"
        );

        Some(SimilarityEdge {
            source: a,
            target: b,
            score,
            name_score,
            attribute_score,
            basis,
        })
    }
}

fn refs(profiles: &[Vec<Profile>]) -> impl Iterator<Item = ConceptRef> + '_ {
    profiles.iter().enumerate().flat_map(|(g, concepts)| {
        (0..concepts.len()).map(move |c| ConceptRef::new(g, ConceptId(c)))
    })
}

/// Compose with default settings (convenience function)
pub fn compose(graphs: Vec<ConceptGraph>) -> Result<ComposedGraph> {
    SimilarityComposer::new().compose(graphs)
}
