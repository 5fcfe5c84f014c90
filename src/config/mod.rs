#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use chrono::NaiveDate;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "pair-analyzer")]
#[command(about = "Finds the employee pair with the longest shared project time")]
pub struct CliConfig {
    /// CSV file with EmpID, ProjectID, DateFrom, DateTo rows
    pub input: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Resolution date for open-ended periods (defaults to today)
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    #[arg(long, value_delimiter = ',', default_value = "csv,json")]
    pub formats: Vec<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU/memory usage per stage")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn as_of_date(&self) -> Option<NaiveDate> {
        self.as_of
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_file_extension("input", &self.input, &["csv"])?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_output_formats("formats", &self.formats)?;
        Ok(())
    }
}
