//! Tests for engine module

use super::*;
use crate::config::{GraphFormat, SimilarityConfig};
use crate::types::{SampleRole, SamplePair};
use pretty_assertions::assert_eq;

fn orders() -> SourceGroup {
    SourceGroup::new("Orders").with_pair(SamplePair::new(
        r#"{"token":"t"}"#,
        r#"{"orderId":1,"customer":{"name":"Ann","email":"a@x.io"}}"#,
    ))
}

fn users() -> SourceGroup {
    SourceGroup::new("Users").with_pair(SamplePair::output_only(
        r#"{"userId":7,"account":{"name":"Bob","email":"b@x.io"}}"#,
    ))
}

fn broken(name: &str) -> SourceGroup {
    SourceGroup::new(name).with_pair(SamplePair::output_only("{not json"))
}

// ============================================================================
// Discovery
// ============================================================================

#[tokio::test]
async fn test_discover_all_keeps_input_order() {
    let pipeline = Pipeline::default();
    let groups = vec![users(), orders(), SourceGroup::new("Zip").with_pair(SamplePair::output_only("{}"))];

    let graphs = pipeline.discover_all(groups).await.unwrap();
    let sources: Vec<&str> = graphs.iter().map(ConceptGraph::source).collect();
    assert_eq!(sources, vec!["Users", "Orders", "Zip"]);
}

#[tokio::test]
async fn test_discover_all_matches_sequential() {
    let pipeline = Pipeline::default();
    let parallel = pipeline.discover_all(vec![orders(), users()]).await.unwrap();
    let sequential = vec![
        crate::schema::discover(&orders()).unwrap(),
        crate::schema::discover(&users()).unwrap(),
    ];
    assert_eq!(parallel, sequential);
}

#[tokio::test]
async fn test_discover_all_first_error_wins() {
    let pipeline = Pipeline::default();
    let err = pipeline
        .discover_all(vec![orders(), broken("B"), SourceGroup::new("C"), broken("D")])
        .await
        .unwrap_err();

    match err {
        Error::MalformedSample {
            group, index, role, ..
        } => {
            assert_eq!(group, "B");
            assert_eq!(index, 0);
            assert_eq!(role, SampleRole::Output);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_discover_all_no_groups() {
    let pipeline = Pipeline::default();
    assert!(matches!(
        pipeline.discover_all(Vec::new()).await,
        Err(Error::NoGroups)
    ));
}

#[tokio::test]
async fn test_input_suffix_from_config() {
    let mut config = EngineConfig::default();
    config.discovery.input_suffix = "Request".to_string();

    let graphs = Pipeline::new(config).discover_all(vec![orders()]).await.unwrap();
    assert!(graphs[0].find("OrdersRequest").is_some());
    assert!(graphs[0].find("OrdersInput").is_none());
}

// ============================================================================
// Full Runs
// ============================================================================

#[tokio::test]
async fn test_run_links_groups() {
    let composed = Pipeline::default().run(vec![orders(), users()]).await.unwrap();

    assert_eq!(composed.graphs().len(), 2);
    assert_eq!(composed.similarities_of("Orders", "customer").len(), 1);
}

#[tokio::test]
async fn test_run_encoded_uses_configured_format() {
    let mut config = EngineConfig::default();
    config.output.format = GraphFormat::Json;
    config.output.pretty = false;

    let text = Pipeline::new(config)
        .run_encoded(vec![orders(), users()])
        .await
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert!(value["nodes"].is_array());

    let xml = Pipeline::default().run_encoded(vec![orders()]).await.unwrap();
    assert!(xml.starts_with("<?xml"));
}

#[tokio::test]
async fn test_invalid_config_rejected() {
    let config = EngineConfig {
        similarity: SimilarityConfig::default().with_threshold(0.0),
        ..EngineConfig::default()
    };
    let err = Pipeline::new(config).run(vec![orders()]).await.unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

#[test]
fn test_run_sync_matches_async() {
    let pipeline = Pipeline::default();
    let blocking = pipeline.run_sync(vec![orders(), users()]).unwrap();

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let parallel = runtime
        .block_on(pipeline.run(vec![orders(), users()]))
        .unwrap();

    assert_eq!(blocking.graphs(), parallel.graphs());
    assert_eq!(blocking.similarities(), parallel.similarities());
}

#[test]
fn test_run_sync_errors() {
    let pipeline = Pipeline::default();
    assert!(matches!(pipeline.run_sync(Vec::new()), Err(Error::NoGroups)));
    assert!(matches!(
        pipeline.run_sync(vec![SourceGroup::new("Empty")]),
        Err(Error::EmptyGroup { .. })
    ));
    assert!(matches!(
        pipeline.run_sync(vec![orders(), orders()]),
        Err(Error::DuplicateGroup { .. })
    ));
}
