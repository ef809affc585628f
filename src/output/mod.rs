//! Output module
//!
//! Encodes a composed graph into a portable node/edge document.
//!
//! # Overview
//!
//! - [`GraphDocument`] is the format-neutral projection: concepts and
//!   attributes become nodes, containment and similarity links become edges
//! - [`render_gexf`] writes the projection as GEXF 1.2 XML
//! - [`encode`] projects and renders in one step for a chosen [`GraphFormat`]
//!
//! Ids (`n0`, `e0`, ...) are unique and stable within one call only.

mod document;
mod gexf;

pub use document::{EdgeKind, EdgeRecord, GraphDocument, NodeKind, NodeRecord};
pub use gexf::render_gexf;

use crate::compose::ComposedGraph;
use crate::config::{GraphFormat, OutputConfig};
use crate::error::Result;

/// Encode a composed graph in the given format
pub fn encode(graph: &ComposedGraph, format: GraphFormat, pretty: bool) -> Result<String> {
    let doc = GraphDocument::from_graph(graph);
    let text = match format {
        GraphFormat::Gexf => render_gexf(&doc, pretty)?,
        GraphFormat::Json if pretty => serde_json::to_string_pretty(&doc)?,
        GraphFormat::Json => serde_json::to_string(&doc)?,
    };
    tracing::debug!(
        format = ?format,
        nodes = doc.nodes.len(),
        edges = doc.edges.len(),
        bytes = text.len(),
        "Encoded graph"
    );
    Ok(text)
}

/// Encode with output settings from the engine config
pub fn encode_with(graph: &ComposedGraph, config: &OutputConfig) -> Result<String> {
    encode(graph, config.format, config.pretty)
}

/// Encode as pretty GEXF (convenience function)
pub fn encode_gexf(graph: &ComposedGraph) -> Result<String> {
    encode(graph, GraphFormat::Gexf, true)
}

/// Encode as pretty JSON (convenience function)
pub fn encode_json(graph: &ComposedGraph) -> Result<String> {
    encode(graph, GraphFormat::Json, true)
}
