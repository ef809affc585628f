//! CLI module
//!
//! Command-line interface for discovering and composing API schemas.
//!
//! # Commands
//!
//! - `discover` - Print the concept graph of every group in a manifest
//! - `compose` - Compose a manifest's groups and write the encoded graph
//! - `serve` - Start HTTP server mode

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands};
pub use runner::Runner;
pub use server::{router, serve, ServerConfig};
