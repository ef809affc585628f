//! Execution engine module
//!
//! Runs the discover → compose → encode pipeline over a set of source groups.
//!
//! # Overview
//!
//! The engine module provides:
//! - `Pipeline` - Owns the engine config and drives the three stages
//! - Parallel discovery: one blocking task per group, results in input order

use crate::compose::{ComposedGraph, SimilarityComposer};
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::output::encode_with;
use crate::schema::{ConceptGraph, SchemaDiscoverer};
use crate::types::SourceGroup;
use futures::future::join_all;
use std::time::Instant;

/// Discover → compose → encode pipeline
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: EngineConfig,
    discoverer: SchemaDiscoverer,
    composer: SimilarityComposer,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Pipeline {
    /// Create a pipeline from an engine config
    pub fn new(config: EngineConfig) -> Self {
        let discoverer =
            SchemaDiscoverer::new().with_input_suffix(config.discovery.input_suffix.clone());
        let composer = SimilarityComposer::with_config(config.similarity.clone());
        Self {
            config,
            discoverer,
            composer,
        }
    }

    /// Get the engine config
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Discover every group in parallel
    ///
    /// Graphs come back in the order of `groups`. When several groups fail,
    /// the error of the first one in that order is returned.
    pub async fn discover_all(&self, groups: Vec<SourceGroup>) -> Result<Vec<ConceptGraph>> {
        if groups.is_empty() {
            return Err(Error::NoGroups);
        }
        self.config.validate()?;

        let start = Instant::now();
        let tasks = groups.into_iter().map(|group| {
            let discoverer = self.discoverer.clone();
            tokio::task::spawn_blocking(move || discoverer.discover(&group))
        });

        let mut graphs = Vec::new();
        for joined in join_all(tasks).await {
            let graph = joined.map_err(|e| Error::task(e.to_string()))??;
            graphs.push(graph);
        }

        tracing::info!(
            groups = graphs.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Discovery complete"
        );
        Ok(graphs)
    }

    /// Compose discovered graphs
    pub fn compose(&self, graphs: Vec<ConceptGraph>) -> Result<ComposedGraph> {
        self.composer.compose(graphs)
    }

    /// Discover and compose
    pub async fn run(&self, groups: Vec<SourceGroup>) -> Result<ComposedGraph> {
        let graphs = self.discover_all(groups).await?;
        self.compose(graphs)
    }

    /// Discover, compose and encode in the configured output format
    pub async fn run_encoded(&self, groups: Vec<SourceGroup>) -> Result<String> {
        let composed = self.run(groups).await?;
        encode_with(&composed, &self.config.output)
    }

    /// Discover and compose on the calling thread, without a runtime
    pub fn run_sync(&self, groups: Vec<SourceGroup>) -> Result<ComposedGraph> {
        if groups.is_empty() {
            return Err(Error::NoGroups);
        }
        self.config.validate()?;

        let graphs = groups
            .iter()
            .map(|group| self.discoverer.discover(group))
            .collect::<Result<Vec<_>>>()?;
        self.compose(graphs)
    }
}

#[cfg(test)]
mod tests;
