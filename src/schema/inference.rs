//! Concept graph discovery from JSON sample pairs

use super::types::{Attribute, Concept, ConceptGraph, ConceptId, Containment, ValueType};
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue, Sample, SampleRole, SamplePair, SourceGroup};
use std::collections::BTreeMap;

/// Field name used for primitives found at the document root
const ROOT_VALUE_FIELD: &str = "value";

/// Field name of the edge from the root concept to the request concept
pub const INPUT_FIELD: &str = "input";

/// Structural identity of a concept: sample side plus field chain
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ConceptKey {
    role: SampleRole,
    path: Vec<String>,
}

impl ConceptKey {
    fn root(role: SampleRole) -> Self {
        Self {
            role,
            path: Vec::new(),
        }
    }

    fn child(&self, field: &str) -> Self {
        let mut path = self.path.clone();
        path.push(field.to_string());
        Self {
            role: self.role,
            path,
        }
    }
}

/// Evidence gathered for one key of a concept
#[derive(Debug, Clone, Default)]
struct FieldShape {
    /// Samples in which the key held a primitive, `null` or `[]`
    attribute_observed: usize,
    /// Samples in which the key held an object, `null` or `[]`
    object_observed: usize,
    /// Merged primitive type, if any primitive was seen
    value_type: Option<ValueType>,
    nullable: bool,
    /// An object (or array of objects) was seen
    object: bool,
    /// Objects came from an array
    many: bool,
    empty_array: bool,
}

impl FieldShape {
    /// Set the 0/1 counts of a single observation from its evidence
    fn counted(mut self) -> Self {
        let either = self.nullable || self.empty_array;
        self.attribute_observed = usize::from(self.value_type.is_some() || either);
        self.object_observed = usize::from(self.object || either);
        self
    }

    /// Fold another observation from the same sample
    fn overlay(&mut self, other: FieldShape) {
        self.attribute_observed = self.attribute_observed.max(other.attribute_observed);
        self.object_observed = self.object_observed.max(other.object_observed);
        self.merge_evidence(other);
    }

    /// Fold the shape gathered from another sample
    fn absorb(&mut self, other: FieldShape) {
        self.attribute_observed += other.attribute_observed;
        self.object_observed += other.object_observed;
        self.merge_evidence(other);
    }

    fn merge_evidence(&mut self, other: FieldShape) {
        self.value_type = ValueType::union_opt(self.value_type.take(), other.value_type);
        self.nullable |= other.nullable;
        self.object |= other.object;
        self.many |= other.many;
        self.empty_array |= other.empty_array;
    }

    fn is_containment(&self) -> bool {
        self.object || (self.empty_array && self.value_type.is_none())
    }

    fn is_attribute(&self) -> bool {
        self.value_type.is_some() || !(self.object || self.empty_array)
    }

    fn attribute_type(&self) -> ValueType {
        match &self.value_type {
            Some(t) if self.empty_array => t.union(&ValueType::array_of(ValueType::Null)),
            Some(t) => t.clone(),
            None => ValueType::Null,
        }
    }
}

#[derive(Debug, Clone)]
struct ConceptShape {
    name: String,
    occurrences: usize,
    fields: BTreeMap<String, FieldShape>,
}

impl ConceptShape {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            occurrences: 0,
            fields: BTreeMap::new(),
        }
    }
}

/// Concept shapes keyed by structural path
///
/// One table is built per sample pair (counts are 0/1) and the per-pair
/// tables are summed. Summing is commutative, so the resulting graph does
/// not depend on sample order.
#[derive(Debug, Default)]
struct ShapeTable {
    concepts: BTreeMap<ConceptKey, ConceptShape>,
}

impl ShapeTable {
    /// Mark a concept as reached by the current sample
    fn touch(&mut self, key: &ConceptKey, name: &str) -> &mut ConceptShape {
        let shape = self
            .concepts
            .entry(key.clone())
            .or_insert_with(|| ConceptShape::new(name));
        shape.occurrences = 1;
        shape
    }

    /// Walk one parsed document, recording every object it contains
    fn observe_document(&mut self, role: SampleRole, root_name: &str, document: &JsonValue) {
        let root = ConceptKey::root(role);
        let mut stack: Vec<(ConceptKey, &JsonObject)> = Vec::new();

        match document {
            JsonValue::Object(map) => stack.push((root, map)),
            JsonValue::Array(items) => {
                self.touch(&root, root_name);
                let mut objects = Vec::new();
                let element = if items.is_empty() {
                    Some(ValueType::Null)
                } else {
                    collect_array(items, &mut objects)
                };
                if let Some(element) = element {
                    let field = FieldShape {
                        value_type: Some(ValueType::array_of(element)),
                        ..FieldShape::default()
                    };
                    self.record_field(&root, ROOT_VALUE_FIELD, field);
                }
                stack.extend(objects.into_iter().map(|o| (root.clone(), o)));
            }
            scalar => {
                self.touch(&root, root_name);
                let field = FieldShape {
                    value_type: Some(ValueType::of_scalar(scalar)),
                    nullable: scalar.is_null(),
                    ..FieldShape::default()
                };
                self.record_field(&root, ROOT_VALUE_FIELD, field);
            }
        }

        while let Some((key, map)) = stack.pop() {
            let name = key.path.last().map_or(root_name, String::as_str).to_string();
            self.touch(&key, &name);

            for (field, value) in map {
                let child_key = key.child(field);
                let mut shape = FieldShape::default();

                match value {
                    JsonValue::Null => shape.nullable = true,
                    JsonValue::Object(child) => {
                        shape.object = true;
                        stack.push((child_key, child));
                    }
                    JsonValue::Array(items) if items.is_empty() => shape.empty_array = true,
                    JsonValue::Array(items) => {
                        let mut objects = Vec::new();
                        shape.value_type = collect_array(items, &mut objects).map(ValueType::array_of);
                        if !objects.is_empty() {
                            shape.object = true;
                            shape.many = true;
                            stack.extend(objects.into_iter().map(|o| (child_key.clone(), o)));
                        }
                    }
                    scalar => shape.value_type = Some(ValueType::of_scalar(scalar)),
                }

                self.record_field(&key, field, shape);
            }
        }
    }

    fn record_field(&mut self, key: &ConceptKey, field: &str, shape: FieldShape) {
        if let Some(concept) = self.concepts.get_mut(key) {
            concept
                .fields
                .entry(field.to_string())
                .or_default()
                .overlay(shape.counted());
        }
    }

    /// Sum another table into this one
    fn absorb(&mut self, other: ShapeTable) {
        for (key, shape) in other.concepts {
            let target = self
                .concepts
                .entry(key)
                .or_insert_with(|| ConceptShape::new(&shape.name));
            target.occurrences += shape.occurrences;
            for (field, evidence) in shape.fields {
                target.fields.entry(field).or_default().absorb(evidence);
            }
        }
    }

    /// Freeze the table into an arena-backed graph
    fn into_graph(mut self, source: &str, samples: usize) -> ConceptGraph {
        // Keys only ever seen holding `[]` still get an (empty) concept
        let mut placeholders = Vec::new();
        for (key, concept) in &self.concepts {
            for (field, shape) in &concept.fields {
                let child = key.child(field);
                if shape.is_containment() && !self.concepts.contains_key(&child) {
                    placeholders.push((child, field.clone()));
                }
            }
        }
        for (key, name) in placeholders {
            self.concepts.insert(key, ConceptShape::new(&name));
        }

        let root_key = ConceptKey::root(SampleRole::Output);
        let input_key = ConceptKey::root(SampleRole::Request);

        // Request-only groups still get a root, reached by no sample
        self.concepts
            .entry(root_key.clone())
            .or_insert_with(|| ConceptShape::new(source));

        let mut ids: BTreeMap<ConceptKey, ConceptId> = BTreeMap::new();
        ids.insert(root_key.clone(), ConceptId(0));
        for key in self.concepts.keys() {
            if *key != root_key {
                let next = ConceptId(ids.len());
                ids.insert(key.clone(), next);
            }
        }

        let input_occurrences = self.concepts.get(&input_key).map(|c| c.occurrences);

        let mut concepts: Vec<Concept> = Vec::with_capacity(self.concepts.len());
        for (key, shape) in &self.concepts {
            let mut attributes = Vec::new();
            let mut children = Vec::new();

            for (field, evidence) in &shape.fields {
                if evidence.is_attribute() {
                    attributes.push(Attribute {
                        name: field.clone(),
                        value_type: evidence.attribute_type(),
                        optional: evidence.attribute_observed < shape.occurrences,
                        nullable: evidence.nullable,
                    });
                }
                if evidence.is_containment() {
                    if let Some(target) = ids.get(&key.child(field)) {
                        children.push(Containment {
                            field: field.clone(),
                            target: *target,
                            optional: evidence.object_observed < shape.occurrences,
                            nullable: evidence.nullable,
                            many: evidence.many,
                        });
                    }
                }
            }

            if *key == root_key {
                if let (Some(occurrences), Some(target)) = (input_occurrences, ids.get(&input_key)) {
                    children.push(Containment {
                        field: INPUT_FIELD.to_string(),
                        target: *target,
                        optional: occurrences < samples,
                        nullable: false,
                        many: false,
                    });
                }
                children.sort_by(|a, b| a.field.cmp(&b.field).then(a.target.cmp(&b.target)));
            }

            concepts.push(Concept {
                id: ids[key],
                name: shape.name.clone(),
                role: key.role,
                path: key.path.clone(),
                occurrences: shape.occurrences,
                attributes,
                children,
            });
        }
        concepts.sort_by_key(|c| c.id);

        ConceptGraph::from_concepts(source, concepts)
    }
}

/// Collect the objects of an array (at any nesting depth) and return the
/// merged type of its non-object elements
fn collect_array<'v>(items: &'v [JsonValue], objects: &mut Vec<&'v JsonObject>) -> Option<ValueType> {
    let mut element: Option<ValueType> = None;
    for item in items {
        let item_type = match item {
            JsonValue::Object(map) => {
                objects.push(map);
                None
            }
            JsonValue::Array(inner) if inner.is_empty() => {
                Some(ValueType::array_of(ValueType::Null))
            }
            JsonValue::Array(inner) => collect_array(inner, objects).map(ValueType::array_of),
            scalar => Some(ValueType::of_scalar(scalar)),
        };
        element = ValueType::union_opt(element, item_type);
    }
    element
}

/// Turns a [`SourceGroup`] into a [`ConceptGraph`]
#[derive(Debug, Clone)]
pub struct SchemaDiscoverer {
    /// Suffix appended to the group name to name the request concept
    input_suffix: String,
}

impl Default for SchemaDiscoverer {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaDiscoverer {
    /// Create a discoverer with default settings
    pub fn new() -> Self {
        Self {
            input_suffix: "Input".to_string(),
        }
    }

    /// Set the request concept name suffix
    #[must_use]
    pub fn with_input_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.input_suffix = suffix.into();
        self
    }

    /// Discover the concept graph of one group
    pub fn discover(&self, group: &SourceGroup) -> Result<ConceptGraph> {
        let mut table = ShapeTable::default();
        let mut usable = 0usize;

        for (index, pair) in group.pairs.iter().enumerate() {
            if !pair.is_usable() {
                continue;
            }
            table.absorb(self.observe_pair(&group.name, index, pair)?);
            usable += 1;
        }

        if usable == 0 {
            return Err(Error::empty_group(&group.name));
        }

        let graph = table.into_graph(&group.name, usable);
        tracing::debug!(
            group = %group.name,
            pairs = usable,
            concepts = graph.len(),
            attributes = graph.attribute_count(),
            "Discovered concept graph"
        );
        Ok(graph)
    }

    /// Build the 0/1 shape table of a single pair
    fn observe_pair(&self, group: &str, index: usize, pair: &SamplePair) -> Result<ShapeTable> {
        let mut table = ShapeTable::default();
        let input_name = format!("{group}{}", self.input_suffix);
        for sample in pair.samples() {
            let document = parse_sample(group, index, sample)?;
            let root_name = match sample.role {
                SampleRole::Request => input_name.as_str(),
                SampleRole::Output => group,
            };
            table.observe_document(sample.role, root_name, &document);
        }

        Ok(table)
    }
}

fn parse_sample(group: &str, index: usize, sample: &Sample) -> Result<JsonValue> {
    sample
        .parse()
        .map_err(|e| Error::malformed(group, index, sample.role, e.to_string()))
}

/// Discover a concept graph with default settings (convenience function)
pub fn discover(group: &SourceGroup) -> Result<ConceptGraph> {
    SchemaDiscoverer::new().discover(group)
}
