//! Node/edge projection of a composed graph

use crate::compose::{ComposedGraph, ConceptRef};
use crate::schema::ValueType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of an encoded node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Concept,
    Attribute,
    /// Attribute whose type was never observed (only `null`)
    Unknown,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Concept => "concept",
            NodeKind::Attribute => "attribute",
            NodeKind::Unknown => "unknown",
        }
    }
}

/// Kind of an encoded edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Containment,
    Similarity,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Containment => "containment",
            EdgeKind::Similarity => "similarity",
        }
    }
}

/// One encoded node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    /// Group the node was discovered in
    pub source: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
}

/// One encoded edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub id: String,
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub many: Option<bool>,
}

/// Sequential ids scoped to one encoding call
struct IdAllocator {
    prefix: char,
    next: usize,
}

impl IdAllocator {
    fn new(prefix: char) -> Self {
        Self { prefix, next: 0 }
    }

    fn next_id(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Portable node/edge view of a [`ComposedGraph`]
///
/// Every concept and every attribute becomes a node. Attributes hang off
/// their concept through a containment edge, so a graph with K concepts,
/// A attributes, C containment edges and S similarity edges yields K + A
/// nodes and C + A + S edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl GraphDocument {
    /// Project a composed graph
    pub fn from_graph(graph: &ComposedGraph) -> Self {
        let mut node_ids = IdAllocator::new('n');
        let mut edge_ids = IdAllocator::new('e');
        let mut doc = GraphDocument::default();
        let mut concept_nodes: HashMap<ConceptRef, String> = HashMap::new();

        for (g, concept_graph) in graph.graphs().iter().enumerate() {
            let source = concept_graph.source();

            for concept in concept_graph.concepts() {
                let concept_node = node_ids.next_id();
                concept_nodes.insert(ConceptRef::new(g, concept.id), concept_node.clone());
                doc.nodes.push(NodeRecord {
                    id: concept_node.clone(),
                    label: concept.name.clone(),
                    kind: NodeKind::Concept,
                    source: source.to_string(),
                    value_type: None,
                    optional: None,
                    nullable: None,
                });

                for attribute in &concept.attributes {
                    let attribute_node = node_ids.next_id();
                    let kind = if attribute.value_type == ValueType::Null {
                        NodeKind::Unknown
                    } else {
                        NodeKind::Attribute
                    };
                    doc.nodes.push(NodeRecord {
                        id: attribute_node.clone(),
                        label: attribute.name.clone(),
                        kind,
                        source: source.to_string(),
                        value_type: Some(attribute.value_type.to_string()),
                        optional: Some(attribute.optional),
                        nullable: Some(attribute.nullable),
                    });
                    doc.edges.push(EdgeRecord {
                        id: edge_ids.next_id(),
                        source: concept_node.clone(),
                        target: attribute_node,
                        kind: EdgeKind::Containment,
                        label: Some(attribute.name.clone()),
                        score: None,
                        basis: None,
                        optional: Some(attribute.optional),
                        many: None,
                    });
                }
            }
        }

        for (g, concept_graph) in graph.graphs().iter().enumerate() {
            for concept in concept_graph.concepts() {
                let from = &concept_nodes[&ConceptRef::new(g, concept.id)];
                for child in &concept.children {
                    doc.edges.push(EdgeRecord {
                        id: edge_ids.next_id(),
                        source: from.clone(),
                        target: concept_nodes[&ConceptRef::new(g, child.target)].clone(),
                        kind: EdgeKind::Containment,
                        label: Some(child.field.clone()),
                        score: None,
                        basis: None,
                        optional: Some(child.optional),
                        many: Some(child.many),
                    });
                }
            }
        }

        for similarity in graph.similarities() {
            doc.edges.push(EdgeRecord {
                id: edge_ids.next_id(),
                source: concept_nodes[&similarity.source].clone(),
                target: concept_nodes[&similarity.target].clone(),
                kind: EdgeKind::Similarity,
                label: None,
                score: Some(similarity.score),
                basis: Some(similarity.basis.to_string()),
                optional: None,
                many: None,
            });
        }

        doc
    }

    /// Nodes of the given kind
    pub fn nodes_of(&self, kind: NodeKind) -> impl Iterator<Item = &NodeRecord> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    /// Edges of the given kind
    pub fn edges_of(&self, kind: EdgeKind) -> impl Iterator<Item = &EdgeRecord> {
        self.edges.iter().filter(move |e| e.kind == kind)
    }
}
