// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # JSON Composer
//!
//! Discovers the implicit data model of JSON web APIs from example
//! request/response pairs and composes the models of several APIs into one
//! graph whose similarity edges point at concepts that look alike.
//!
//! ## Features
//!
//! - **Schema Discovery**: One concept graph per API, inferred from samples
//! - **Composition**: Name and attribute similarity across APIs
//! - **Encoding**: GEXF 1.2 for graph tools, or a JSON node/edge document
//! - **Adapters**: Form parameters, YAML manifests, CLI and HTTP server
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use json_composer::{Pipeline, SamplePair, SourceGroup, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let orders = SourceGroup::new("Orders")
//!         .with_pair(SamplePair::new("{}", r#"{"customer":{"name":"Ann"}}"#));
//!     let users = SourceGroup::new("Users")
//!         .with_pair(SamplePair::output_only(r#"{"account":{"name":"Bob"}}"#));
//!
//!     let gexf = Pipeline::default().run_encoded(vec![orders, users]).await?;
//!     println!("{gexf}");
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────────┐   ┌────────────────────┐   ┌─────────────┐
//! │   Loader    │──▶│      Schema      │──▶│      Compose       │──▶│   Output    │
//! │ form params │   │ SchemaDiscoverer │   │ SimilarityComposer │   │ GEXF / JSON │
//! │ manifests   │   │ (one per group)  │   │ (across groups)    │   │             │
//! └─────────────┘   └──────────────────┘   └────────────────────┘   └─────────────┘
//!                   engine::Pipeline drives discovery, composition and encoding
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the composer
pub mod error;

/// Common types and type aliases
pub mod types;

/// Engine configuration
pub mod config;

/// Source group loading (form parameters, manifests)
pub mod loader;

/// Concept graph discovery from JSON samples
pub mod schema;

/// Cross-API similarity composition
pub mod compose;

/// Graph encoding (GEXF, JSON)
pub mod output;

/// Discover → compose → encode pipeline
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use compose::{compose, ComposedGraph, SimilarityComposer};
pub use config::{load_config, EngineConfig, GraphFormat};
pub use engine::Pipeline;
pub use loader::{digest_params, load_manifest};
pub use output::encode;
pub use schema::{discover, ConceptGraph, SchemaDiscoverer};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
