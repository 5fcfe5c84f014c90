use crate::core::normalizer::parse_date;
use crate::utils::error::{AnalyzerError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(AnalyzerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(AnalyzerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AnalyzerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_file_extension(
    field_name: &str,
    file: &str,
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    if let Some(extension) = std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        if !allowed_set.contains(extension) {
            return Err(AnalyzerError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: file.to_string(),
                reason: format!(
                    "Unsupported file extension: {}. Allowed extensions: {}",
                    extension,
                    allowed_extensions.join(", ")
                ),
            });
        }
        Ok(())
    } else {
        Err(AnalyzerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        })
    }
}

pub fn validate_output_formats(field_name: &str, formats: &[String]) -> Result<()> {
    let valid_formats = ["csv", "json"];

    if formats.is_empty() {
        return Err(AnalyzerError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    for format in formats {
        if !valid_formats.contains(&format.as_str()) {
            return Err(AnalyzerError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.clone(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    valid_formats.join(", ")
                ),
            });
        }
    }

    Ok(())
}

pub fn validate_date(field_name: &str, value: &str) -> Result<()> {
    parse_date(value).map_err(|_| AnalyzerError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: "Not a recognized date (use YYYY-MM-DD, M/D/YYYY or DD/MM/YYYY)".to_string(),
    })?;
    Ok(())
}
