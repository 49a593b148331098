//! Reading and writing property objects as JSON or YAML text

use crate::error::{Error, Result};
use crate::properties::ConfigurationObject;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    #[default]
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("json") => Some(Self::Json),
            Some("yaml") | Some("yml") => Some(Self::Yaml),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Yaml => f.write_str("yaml"),
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(Error::invalid_input(format!(
                "Unsupported document format: {} (expected json or yaml)",
                other
            ))),
        }
    }
}

pub fn read_document(text: &str, format: DocumentFormat) -> Result<ConfigurationObject> {
    let object = match format {
        DocumentFormat::Json => serde_json::from_str(text)?,
        DocumentFormat::Yaml => serde_yaml::from_str(text)?,
    };
    Ok(object)
}

pub fn write_document(object: &ConfigurationObject, format: DocumentFormat) -> Result<String> {
    let mut text = match format {
        DocumentFormat::Json => serde_json::to_string_pretty(object)?,
        DocumentFormat::Yaml => serde_yaml::to_string(object)?,
    };

    if !text.ends_with('\n') {
        text.push('\n');
    }

    Ok(text)
}
