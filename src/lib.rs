pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::storage::LocalStorage;
pub use config::{toml_config::TomlConfig, RunConfig};
pub use crate::core::{etl::EtlEngine, pipeline::LabPipeline};
pub use domain::model::{DedupMode, LabRecord, MissingValuePolicy, RunSummary};
pub use utils::error::{EtlError, Result};
