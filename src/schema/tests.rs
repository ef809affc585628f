//! Schema discovery tests

use super::*;
use crate::error::Error;
use crate::types::{SampleRole, SamplePair, SourceGroup};
use pretty_assertions::assert_eq;
use test_case::test_case;

fn group(name: &str, outputs: &[&str]) -> SourceGroup {
    outputs.iter().fold(SourceGroup::new(name), |g, out| {
        g.with_pair(SamplePair::output_only(*out))
    })
}

// ============================================================================
// Basic Discovery
// ============================================================================

#[test]
fn test_orders_single_pair() {
    let orders = SourceGroup::new("Orders").with_pair(SamplePair::new(
        "{}",
        r#"{"id":1,"items":[{"sku":"A","qty":2}]}"#,
    ));

    let graph = discover(&orders).unwrap();
    assert_eq!(graph.source(), "Orders");

    let root = graph.root_concept();
    assert_eq!(root.name, "Orders");
    let id = root.attribute("id").unwrap();
    assert_eq!(id.value_type, ValueType::Number);
    assert!(!id.optional);

    let items_edge = root.child("items").unwrap();
    assert!(!items_edge.optional);
    assert!(items_edge.many);

    let items = graph.child_of(root, "items").unwrap();
    assert_eq!(items.name, "items");
    assert_eq!(items.attribute_names().into_iter().collect::<Vec<_>>(), vec!["qty", "sku"]);
    assert_eq!(items.attribute("sku").unwrap().value_type, ValueType::String);
    assert_eq!(items.attribute("qty").unwrap().value_type, ValueType::Number);
    assert!(items.attributes.iter().all(|a| !a.optional));
}

#[test]
fn test_missing_containment_becomes_optional() {
    let orders = SourceGroup::new("Orders")
        .with_pair(SamplePair::new("{}", r#"{"id":1,"items":[{"sku":"A","qty":2}]}"#))
        .with_pair(SamplePair::new("{}", r#"{"id":2}"#));

    let graph = discover(&orders).unwrap();
    let root = graph.root_concept();

    assert!(!root.attribute("id").unwrap().optional);
    assert!(root.child("items").unwrap().optional);
}

#[test]
fn test_request_side_concept() {
    let users = SourceGroup::new("Users")
        .with_pair(SamplePair::new(r#"{"q":"bob"}"#, r#"{"total":1}"#))
        .with_pair(SamplePair::output_only(r#"{"total":0}"#));

    let graph = discover(&users).unwrap();
    let root = graph.root_concept();

    let input_edge = root.child(INPUT_FIELD).unwrap();
    assert!(input_edge.optional);

    let input = graph.concept(input_edge.target).unwrap();
    assert_eq!(input.name, "UsersInput");
    assert_eq!(input.role, SampleRole::Request);
    assert!(!input.attribute("q").unwrap().optional);
}

#[test]
fn test_custom_input_suffix() {
    let users = SourceGroup::new("Users").with_pair(SamplePair::new(r#"{"q":1}"#, ""));
    let graph = SchemaDiscoverer::new()
        .with_input_suffix("Params")
        .discover(&users)
        .unwrap();

    assert!(graph.find("UsersParams").is_some());
    // Root exists even though no output was observed
    assert_eq!(graph.root_concept().name, "Users");
    assert!(graph.root_concept().attributes.is_empty());
}

#[test]
fn test_nested_objects_keyed_by_path() {
    let g = group(
        "Shop",
        &[r#"{"billing":{"address":{"city":"X"}},"shipping":{"address":{"zip":"1"}}}"#],
    );
    let graph = discover(&g).unwrap();

    let billing = graph
        .find_by_path(SampleRole::Output, &["billing", "address"])
        .unwrap();
    let shipping = graph
        .find_by_path(SampleRole::Output, &["shipping", "address"])
        .unwrap();

    assert_ne!(billing.id, shipping.id);
    assert_eq!(billing.name, "address");
    assert!(billing.attribute("city").is_some());
    assert!(shipping.attribute("zip").is_some());
    assert_eq!(graph.len(), 5);
}

// ============================================================================
// Type Inference
// ============================================================================

#[test_case(ValueType::Number, ValueType::String, ValueType::Mixed ; "number and string")]
#[test_case(ValueType::String, ValueType::Number, ValueType::Mixed ; "string and number")]
#[test_case(ValueType::Null, ValueType::Boolean, ValueType::Boolean ; "null is identity")]
#[test_case(ValueType::Mixed, ValueType::Null, ValueType::Mixed ; "mixed absorbs null")]
#[test_case(
    ValueType::array_of(ValueType::Null),
    ValueType::array_of(ValueType::Number),
    ValueType::array_of(ValueType::Number) ; "array element union"
)]
#[test_case(ValueType::array_of(ValueType::Number), ValueType::Number, ValueType::Mixed ; "array and scalar")]
fn test_value_type_union(a: ValueType, b: ValueType, expected: ValueType) {
    assert_eq!(a.union(&b), expected);
    assert_eq!(b.union(&a), expected);
}

#[test]
fn test_type_disagreement_is_mixed_in_either_order() {
    let forward = discover(&group("A", &[r#"{"v":1}"#, r#"{"v":"x"}"#])).unwrap();
    let backward = discover(&group("A", &[r#"{"v":"x"}"#, r#"{"v":1}"#])).unwrap();

    let attr = forward.root_concept().attribute("v").unwrap();
    assert_eq!(attr.value_type, ValueType::Mixed);
    assert_eq!(forward, backward);
}

#[test]
fn test_null_does_not_override_type() {
    let graph = discover(&group("A", &[r#"{"v":"x"}"#, r#"{"v":null}"#])).unwrap();
    let attr = graph.root_concept().attribute("v").unwrap();

    assert_eq!(attr.value_type, ValueType::String);
    assert!(attr.nullable);
    assert!(!attr.optional);
}

#[test]
fn test_only_null_observed() {
    let graph = discover(&group("A", &[r#"{"v":null}"#])).unwrap();
    let attr = graph.root_concept().attribute("v").unwrap();
    assert_eq!(attr.value_type, ValueType::Null);
    assert!(attr.nullable);
}

#[test]
fn test_array_of_primitives() {
    let graph = discover(&group("A", &[r#"{"tags":["a","b"]}"#, r#"{"tags":[]}"#])).unwrap();
    let root = graph.root_concept();

    let tags = root.attribute("tags").unwrap();
    assert_eq!(tags.value_type, ValueType::array_of(ValueType::String));
    assert_eq!(tags.value_type.to_string(), "array<string>");
    assert!(root.child("tags").is_none());
    assert_eq!(graph.len(), 1);
}

#[test]
fn test_nested_primitive_arrays() {
    let graph = discover(&group("A", &[r#"{"m":[[1,2],[3]]}"#])).unwrap();
    let attr = graph.root_concept().attribute("m").unwrap();
    assert_eq!(
        attr.value_type,
        ValueType::array_of(ValueType::array_of(ValueType::Number))
    );
}

#[test]
fn test_empty_containers_create_concepts() {
    let graph = discover(&group("A", &[r#"{"meta":{},"rows":[]}"#])).unwrap();
    let root = graph.root_concept();

    let meta = graph.child_of(root, "meta").unwrap();
    assert!(meta.attributes.is_empty());
    let rows = graph.child_of(root, "rows").unwrap();
    assert!(rows.attributes.is_empty());
    assert!(root.attributes.is_empty());
}

#[test]
fn test_empty_array_later_populated() {
    let graph = discover(&group("A", &[r#"{"rows":[]}"#, r#"{"rows":[{"n":1}]}"#])).unwrap();
    let root = graph.root_concept();

    let edge = root.child("rows").unwrap();
    assert!(!edge.optional);
    assert!(edge.many);
    let rows = graph.concept(edge.target).unwrap();
    assert!(rows.attribute("n").is_some());
}

#[test]
fn test_top_level_array_folds_into_root() {
    let graph = discover(&group("List", &[r#"[{"id":1},{"id":2,"name":"b"}]"#])).unwrap();
    let root = graph.root_concept();

    assert_eq!(root.name, "List");
    assert!(root.attribute("id").is_some());
    // Both keys were seen in the one sample that reached the root
    assert!(!root.attribute("name").unwrap().optional);
    assert!(root.attribute("value").is_none());
}

#[test]
fn test_top_level_scalar() {
    let graph = discover(&group("Count", &["42"])).unwrap();
    let value = graph.root_concept().attribute("value").unwrap();
    assert_eq!(value.value_type, ValueType::Number);
}

// ============================================================================
// Optionality
// ============================================================================

#[test]
fn test_optionality_follows_sample_counts() {
    let graph = discover(&group(
        "A",
        &[
            r#"{"a":1,"b":1,"c":{"x":1}}"#,
            r#"{"a":2,"c":{"x":2,"y":1}}"#,
            r#"{"a":3,"b":null}"#,
        ],
    ))
    .unwrap();
    let root = graph.root_concept();

    assert!(!root.attribute("a").unwrap().optional);
    assert!(root.attribute("b").unwrap().optional);
    assert!(root.child("c").unwrap().optional);

    // Only two samples reached `c`
    let c = graph.child_of(root, "c").unwrap();
    assert_eq!(c.occurrences, 2);
    assert!(!c.attribute("x").unwrap().optional);
    assert!(c.attribute("y").unwrap().optional);
}

#[test]
fn test_request_only_pair_does_not_reach_root() {
    let g = SourceGroup::new("Search")
        .with_pair(SamplePair::output_only(r#"{"id":1}"#))
        .with_pair(SamplePair::new(r#"{"q":1}"#, ""));
    let graph = discover(&g).unwrap();
    let root = graph.root_concept();

    assert_eq!(root.occurrences, 1);
    assert!(!root.attribute("id").unwrap().optional);

    // One of the two usable pairs had no request
    let input = root.child(INPUT_FIELD).unwrap();
    assert!(input.optional);
    assert_eq!(graph.concept(input.target).unwrap().occurrences, 1);
}

#[test]
fn test_request_only_group_keeps_empty_root() {
    let g = SourceGroup::new("Ping")
        .with_pair(SamplePair::new(r#"{"q":1}"#, ""))
        .with_pair(SamplePair::new(r#"{"q":2}"#, ""));
    let graph = discover(&g).unwrap();
    let root = graph.root_concept();

    assert_eq!(root.id, graph.root());
    assert_eq!(root.name, "Ping");
    assert_eq!(root.occurrences, 0);
    assert!(!root.child(INPUT_FIELD).unwrap().optional);
}

#[test]
fn test_primitive_and_object_counted_apart() {
    let graph = discover(&group("G", &[r#"{"a":1}"#, r#"{"a":{"x":1}}"#])).unwrap();
    let root = graph.root_concept();

    let attr = root.attribute("a").unwrap();
    assert_eq!(attr.value_type, ValueType::Number);
    assert!(attr.optional);

    let edge = root.child("a").unwrap();
    assert!(edge.optional);
    assert!(!graph.concept(edge.target).unwrap().attribute("x").unwrap().optional);
}

#[test]
fn test_null_counts_for_both_shapes() {
    let graph = discover(&group(
        "G",
        &[r#"{"a":1}"#, r#"{"a":{"x":1}}"#, r#"{"a":null}"#],
    ))
    .unwrap();
    let root = graph.root_concept();

    // Each shape was seen in two of three samples
    assert!(root.attribute("a").unwrap().optional);
    assert!(root.attribute("a").unwrap().nullable);
    assert!(root.child("a").unwrap().optional);

    let nested = discover(&group("H", &[r#"{"a":{"x":1}}"#, r#"{"a":null}"#])).unwrap();
    let edge = nested.root_concept().child("a").unwrap();
    assert!(!edge.optional);
    assert!(edge.nullable);
}

#[test]
fn test_merge_order_independence() {
    let samples = [
        r#"{"id":1,"items":[{"sku":"A"}],"tag":"x"}"#,
        r#"{"id":"2","items":[],"extra":{"k":true}}"#,
        r#"{"id":3,"items":[{"sku":"B","qty":1}],"tag":null}"#,
    ];
    let orders = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];

    let reference = discover(&group("P", &samples)).unwrap();
    for order in orders {
        let permuted: Vec<&str> = order.iter().map(|i| samples[*i]).collect();
        let graph = discover(&group("P", &permuted)).unwrap();
        assert_eq!(graph, reference);
    }
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_malformed_sample() {
    let g = SourceGroup::new("Orders")
        .with_pair(SamplePair::output_only("{}"))
        .with_pair(SamplePair::new("{not json", "{}"));

    match discover(&g).unwrap_err() {
        Error::MalformedSample {
            group, index, role, ..
        } => {
            assert_eq!(group, "Orders");
            assert_eq!(index, 1);
            assert_eq!(role, SampleRole::Request);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_group() {
    let no_pairs = SourceGroup::new("Empty");
    assert!(matches!(discover(&no_pairs), Err(Error::EmptyGroup { .. })));

    let unusable = SourceGroup::new("Blank").with_pair(SamplePair::new("", ""));
    assert!(matches!(discover(&unusable), Err(Error::EmptyGroup { .. })));
}

#[test]
fn test_unusable_pairs_are_skipped() {
    let g = SourceGroup::new("A")
        .with_pair(SamplePair::default())
        .with_pair(SamplePair::output_only(r#"{"a":1}"#));
    let graph = discover(&g).unwrap();
    assert_eq!(graph.root_concept().occurrences, 1);
    assert!(!graph.root_concept().attribute("a").unwrap().optional);
}
