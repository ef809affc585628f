//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::{load_config, EngineConfig, GraphFormat};
use crate::engine::Pipeline;
use crate::error::{Result, ResultExt};
use crate::loader::load_manifest;
use crate::output::encode;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;

        match &self.cli.command {
            Commands::Discover { manifest } => self.discover(config, manifest).await,
            Commands::Compose {
                manifest,
                format,
                output,
            } => {
                self.compose(config, manifest, *format, output.as_deref())
                    .await
            }
            Commands::Serve { port } => {
                let config = crate::cli::ServerConfig { engine: config };
                crate::cli::serve(config, *port).await
            }
        }
    }

    /// Load the engine config, or defaults when none was given
    fn load_config(&self) -> Result<EngineConfig> {
        let config = match &self.cli.config {
            Some(path) => load_config(path)?,
            None => EngineConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Print every group's concept graph
    async fn discover(&self, config: EngineConfig, manifest: &Path) -> Result<()> {
        let groups = load_manifest(manifest)?;
        let graphs = Pipeline::new(config).discover_all(groups).await?;

        let graphs: Vec<Value> = graphs.iter().map(|g| g.to_json()).collect();
        self.output_message(&json!({
            "type": "GRAPHS",
            "graphs": graphs
        }));
        Ok(())
    }

    /// Compose all groups and write the encoded graph
    async fn compose(
        &self,
        config: EngineConfig,
        manifest: &Path,
        format: Option<GraphFormat>,
        output: Option<&Path>,
    ) -> Result<()> {
        let groups = load_manifest(manifest)?;
        let format = format.unwrap_or(config.output.format);
        let pretty = config.output.pretty;

        let composed = Pipeline::new(config).run(groups).await?;
        let text = encode(&composed, format, pretty)?;

        match output {
            Some(path) => {
                fs::write(path, &text)
                    .with_context(|| format!("Failed to write '{}'", path.display()))?;
                tracing::info!(
                    path = %path.display(),
                    concepts = composed.concept_count(),
                    similarities = composed.similarity_count(),
                    "Wrote composed graph"
                );
            }
            None => println!("{text}"),
        }
        Ok(())
    }

    /// Output a JSON message to stdout
    fn output_message(&self, msg: &Value) {
        if self.cli.verbose {
            println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
        } else {
            println!("{}", serde_json::to_string(msg).unwrap_or_default());
        }
    }
}
