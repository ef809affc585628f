//! Concept graph types

use crate::types::SampleRole;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Inferred type of a primitive attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Number,
    Boolean,
    /// Only `null` was ever observed
    Null,
    /// Samples disagreed on the type
    Mixed,
    /// Array of primitives with the merged element type
    Array(Box<ValueType>),
}

impl ValueType {
    /// Type of a scalar JSON value. Containers map to `Mixed`.
    pub fn of_scalar(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ValueType::Null,
            serde_json::Value::Bool(_) => ValueType::Boolean,
            serde_json::Value::Number(_) => ValueType::Number,
            serde_json::Value::String(_) => ValueType::String,
            _ => ValueType::Mixed,
        }
    }

    /// Array type with the given element type
    pub fn array_of(element: ValueType) -> Self {
        ValueType::Array(Box::new(element))
    }

    /// Merge two types, returning their union
    ///
    /// `Null` is the identity and `Mixed` absorbs everything, so the merge is
    /// commutative and associative.
    pub fn union(&self, other: &ValueType) -> ValueType {
        match (self, other) {
            (ValueType::Null, t) | (t, ValueType::Null) => t.clone(),
            (a, b) if a == b => a.clone(),
            (ValueType::Array(a), ValueType::Array(b)) => ValueType::array_of(a.union(b)),
            _ => ValueType::Mixed,
        }
    }

    /// Union of two optional types
    pub fn union_opt(a: Option<ValueType>, b: Option<ValueType>) -> Option<ValueType> {
        match (a, b) {
            (Some(a), Some(b)) => Some(a.union(&b)),
            (Some(t), None) | (None, Some(t)) => Some(t),
            (None, None) => None,
        }
    }

    /// Check if this is an array type
    pub fn is_array(&self) -> bool {
        matches!(self, ValueType::Array(_))
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::String => write!(f, "string"),
            ValueType::Number => write!(f, "number"),
            ValueType::Boolean => write!(f, "boolean"),
            ValueType::Null => write!(f, "null"),
            ValueType::Mixed => write!(f, "mixed"),
            ValueType::Array(element) => write!(f, "array<{element}>"),
        }
    }
}

/// Index of a concept inside its owning [`ConceptGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConceptId(pub usize);

impl fmt::Display for ConceptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A primitive attribute of a concept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    /// Not present in every sample that reached the concept
    pub optional: bool,
    /// `null` was observed at least once
    pub nullable: bool,
}

/// Containment edge from a concept to a child concept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Containment {
    /// Field name that introduced the child
    pub field: String,
    pub target: ConceptId,
    pub optional: bool,
    pub nullable: bool,
    /// The child came from an array of objects
    pub many: bool,
}

/// One JSON object shape discovered during inference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub id: ConceptId,
    pub name: String,
    /// Which side of the sample pairs introduced this concept
    pub role: SampleRole,
    /// Field chain from the document root, array slots collapsed
    pub path: Vec<String>,
    /// Number of samples that reached this concept
    pub occurrences: usize,
    /// Sorted by name
    pub attributes: Vec<Attribute>,
    /// Sorted by field name
    pub children: Vec<Containment>,
}

impl Concept {
    /// Get an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Get a containment edge by field name
    pub fn child(&self, field: &str) -> Option<&Containment> {
        self.children.iter().find(|c| c.field == field)
    }

    /// Names of the primitive attributes
    pub fn attribute_names(&self) -> BTreeSet<&str> {
        self.attributes.iter().map(|a| a.name.as_str()).collect()
    }
}

/// All concepts discovered for one source group
///
/// Concepts live in one arena and reference each other by [`ConceptId`].
/// The root always has id 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptGraph {
    source: String,
    concepts: Vec<Concept>,
}

impl ConceptGraph {
    pub(crate) fn from_concepts(source: impl Into<String>, concepts: Vec<Concept>) -> Self {
        debug_assert!(concepts.iter().enumerate().all(|(i, c)| c.id.0 == i));
        Self {
            source: source.into(),
            concepts,
        }
    }

    /// Name of the source group this graph was discovered from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Id of the root concept
    pub fn root(&self) -> ConceptId {
        ConceptId(0)
    }

    /// The root concept
    pub fn root_concept(&self) -> &Concept {
        &self.concepts[0]
    }

    /// Get a concept by id
    pub fn concept(&self, id: ConceptId) -> Option<&Concept> {
        self.concepts.get(id.0)
    }

    /// All concepts, in id order
    pub fn concepts(&self) -> &[Concept] {
        &self.concepts
    }

    /// Number of concepts
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    /// A discovered graph always holds at least its root
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// First concept with the given name
    pub fn find(&self, name: &str) -> Option<&Concept> {
        self.concepts.iter().find(|c| c.name == name)
    }

    /// Concept reached by a field chain on one side of the samples
    pub fn find_by_path(&self, role: SampleRole, path: &[&str]) -> Option<&Concept> {
        self.concepts
            .iter()
            .find(|c| c.role == role && c.path.iter().map(String::as_str).eq(path.iter().copied()))
    }

    /// Child concept reached from `parent` through `field`
    pub fn child_of(&self, parent: &Concept, field: &str) -> Option<&Concept> {
        parent.child(field).and_then(|edge| self.concept(edge.target))
    }

    /// Total number of primitive attributes
    pub fn attribute_count(&self) -> usize {
        self.concepts.iter().map(|c| c.attributes.len()).sum()
    }

    /// Total number of containment edges
    pub fn containment_count(&self) -> usize {
        self.concepts.iter().map(|c| c.children.len()).sum()
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
