use crate::core::ConfigProvider;
use crate::core::normalizer::parse_date;
use crate::utils::error::{AnalyzerError, Result};
use crate::utils::validation::{self, Validate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub report: ReportConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
    /// Resolution date for open-ended periods; today when unset.
    pub as_of: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub formats: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AnalyzerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AnalyzerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("report.name", &self.report.name)?;
        validation::validate_path("input.path", &self.input.path)?;
        validation::validate_file_extension("input.path", &self.input.path, &["csv"])?;
        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_output_formats("output.formats", &self.output.formats)?;

        if let Some(as_of) = &self.input.as_of {
            validation::validate_date("input.as_of", as_of)?;
        }

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.input.path
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn as_of_date(&self) -> Option<NaiveDate> {
        // validate_config 已確認可解析
        self.input.as_of.as_deref().and_then(|s| parse_date(s).ok())
    }

    fn output_formats(&self) -> &[String] {
        &self.output.formats
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[report]
name = "longest-pair"
description = "Longest-working employee pair"
version = "1.0.0"

[input]
path = "./data/assignments.csv"
as_of = "2021-06-15"

[output]
path = "./report-output"
formats = ["csv", "json"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.report.name, "longest-pair");
        assert_eq!(config.input_path(), "./data/assignments.csv");
        assert_eq!(
            config.as_of_date(),
            NaiveDate::from_ymd_opt(2021, 6, 15)
        );
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_PAIR_INPUT", "/tmp/assignments.csv");

        let toml_content = r#"
[report]
name = "test"
description = "test"
version = "1.0"

[input]
path = "${TEST_PAIR_INPUT}"

[output]
path = "./output"
formats = ["csv"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.input.path, "/tmp/assignments.csv");

        std::env::remove_var("TEST_PAIR_INPUT");
    }

    #[test]
    fn test_unset_env_var_is_left_in_place() {
        let toml_content = r#"
[report]
name = "test"
description = "test"
version = "1.0"

[input]
path = "${PAIR_ANALYZER_UNSET_VAR}"

[output]
path = "./output"
formats = ["csv"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.input.path, "${PAIR_ANALYZER_UNSET_VAR}");
    }

    #[test]
    fn test_config_validation_rejects_bad_values() {
        let toml_content = r#"
[report]
name = "test"
description = "test"
version = "1.0"

[input]
path = "assignments.txt"

[output]
path = "./output"
formats = ["csv"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_rejects_bad_as_of() {
        let toml_content = r#"
[report]
name = "test"
description = "test"
version = "1.0"

[input]
path = "assignments.csv"
as_of = "someday"

[output]
path = "./output"
formats = ["json"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[report]
name = "file-test"
description = "File test"
version = "1.0"

[input]
path = "assignments.csv"

[output]
path = "./output"
formats = ["csv", "json"]

[monitoring]
enabled = true
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.report.name, "file-test");
        assert!(config.monitoring_enabled());
    }
}
