//! Parsing and validation of `bel-repository.toml` repository configuration.
//!
//! This crate reads the optional configuration file at a repository root and
//! produces a strongly-typed [`RepositoryConfig`]. A missing file yields the
//! defaults. The values are plain data; turning them into cache settings,
//! compile options and a metadata overlay is up to the consumer.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
