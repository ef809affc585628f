//! GEXF 1.2 rendering
//!
//! See <https://gexf.net/> for the format. Node and edge properties are
//! written as `attvalues` against the attribute tables declared up front.

use super::document::{EdgeKind, GraphDocument};
use crate::error::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

const GEXF_NS: &str = "http://www.gexf.net/1.2draft";
const GEXF_VERSION: &str = "1.2";

/// (id, title, type) of the node attribute table
const NODE_ATTRIBUTES: [(&str, &str, &str); 5] = [
    ("0", "kind", "string"),
    ("1", "source", "string"),
    ("2", "type", "string"),
    ("3", "optional", "boolean"),
    ("4", "nullable", "boolean"),
];

/// (id, title, type) of the edge attribute table
const EDGE_ATTRIBUTES: [(&str, &str, &str); 5] = [
    ("0", "kind", "string"),
    ("1", "score", "double"),
    ("2", "basis", "string"),
    ("3", "optional", "boolean"),
    ("4", "many", "boolean"),
];

/// Render a projected graph as a GEXF document
pub fn render_gexf(doc: &GraphDocument, pretty: bool) -> Result<String> {
    let mut writer = if pretty {
        Writer::new_with_indent(Vec::new(), b' ', 2)
    } else {
        Writer::new(Vec::new())
    };

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("gexf");
    root.push_attribute(("xmlns", GEXF_NS));
    root.push_attribute(("version", GEXF_VERSION));
    writer.write_event(Event::Start(root))?;

    let mut graph = BytesStart::new("graph");
    graph.push_attribute(("mode", "static"));
    graph.push_attribute(("defaultedgetype", "directed"));
    writer.write_event(Event::Start(graph))?;

    write_attribute_table(&mut writer, "node", &NODE_ATTRIBUTES)?;
    write_attribute_table(&mut writer, "edge", &EDGE_ATTRIBUTES)?;

    writer.write_event(Event::Start(BytesStart::new("nodes")))?;
    for node in &doc.nodes {
        let mut start = BytesStart::new("node");
        start.push_attribute(("id", node.id.as_str()));
        start.push_attribute(("label", node.label.as_str()));
        writer.write_event(Event::Start(start))?;

        let mut values = vec![
            ("0", node.kind.as_str().to_string()),
            ("1", node.source.clone()),
        ];
        if let Some(value_type) = &node.value_type {
            values.push(("2", value_type.clone()));
        }
        if let Some(optional) = node.optional {
            values.push(("3", optional.to_string()));
        }
        if let Some(nullable) = node.nullable {
            values.push(("4", nullable.to_string()));
        }
        write_attvalues(&mut writer, &values)?;

        writer.write_event(Event::End(BytesEnd::new("node")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("nodes")))?;

    writer.write_event(Event::Start(BytesStart::new("edges")))?;
    for edge in &doc.edges {
        let mut start = BytesStart::new("edge");
        start.push_attribute(("id", edge.id.as_str()));
        start.push_attribute(("source", edge.source.as_str()));
        start.push_attribute(("target", edge.target.as_str()));
        if let Some(label) = &edge.label {
            start.push_attribute(("label", label.as_str()));
        }
        if edge.kind == EdgeKind::Similarity {
            start.push_attribute(("type", "undirected"));
            if let Some(score) = edge.score {
                start.push_attribute(("weight", score.to_string().as_str()));
            }
        }
        writer.write_event(Event::Start(start))?;

        let mut values = vec![("0", edge.kind.as_str().to_string())];
        if let Some(score) = edge.score {
            values.push(("1", score.to_string()));
        }
        if let Some(basis) = &edge.basis {
            values.push(("2", basis.clone()));
        }
        if let Some(optional) = edge.optional {
            values.push(("3", optional.to_string()));
        }
        if let Some(many) = edge.many {
            values.push(("4", many.to_string()));
        }
        write_attvalues(&mut writer, &values)?;

        writer.write_event(Event::End(BytesEnd::new("edge")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("edges")))?;

    writer.write_event(Event::End(BytesEnd::new("graph")))?;
    writer.write_event(Event::End(BytesEnd::new("gexf")))?;

    String::from_utf8(writer.into_inner())
        .map_err(|e| Error::Other(format!("GEXF output is not UTF-8: {e}")))
}

fn write_attribute_table(
    writer: &mut Writer<Vec<u8>>,
    class: &str,
    table: &[(&str, &str, &str)],
) -> Result<()> {
    let mut start = BytesStart::new("attributes");
    start.push_attribute(("class", class));
    writer.write_event(Event::Start(start))?;

    for (id, title, kind) in table {
        let mut attribute = BytesStart::new("attribute");
        attribute.push_attribute(("id", *id));
        attribute.push_attribute(("title", *title));
        attribute.push_attribute(("type", *kind));
        writer.write_event(Event::Empty(attribute))?;
    }

    writer.write_event(Event::End(BytesEnd::new("attributes")))?;
    Ok(())
}

fn write_attvalues(writer: &mut Writer<Vec<u8>>, values: &[(&str, String)]) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("attvalues")))?;
    for (id, value) in values {
        let mut attvalue = BytesStart::new("attvalue");
        attvalue.push_attribute(("for", *id));
        attvalue.push_attribute(("value", value.as_str()));
        writer.write_event(Event::Empty(attvalue))?;
    }
    writer.write_event(Event::End(BytesEnd::new("attvalues")))?;
    Ok(())
}
