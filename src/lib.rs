pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, CliConfig};
pub use config::toml_config::TomlConfig;

pub use core::{engine::AnalysisEngine, pipeline::CsvPipeline};
pub use domain::model::{EmployeePair, PairDuration, WorkPeriod};
pub use utils::error::{AnalyzerError, Result};
