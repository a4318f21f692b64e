use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::config::PageSettings;
use crate::errors::ConfigurationError;

/// Loosely typed page request, as received from JSON or the command line.
///
/// Page size and page number are kept as raw JSON values so that missing and
/// mistyped arguments can be reported with their own error codes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageRequest {
    pub query: String,
    #[serde(default, alias = "params")]
    pub parameters: Vec<Value>,
    #[serde(default, alias = "perPage")]
    pub per_page: Option<Value>,
    #[serde(default, alias = "currentPage", alias = "page")]
    pub current_page: Option<Value>,
}

impl PageRequest {
    pub fn new(query: impl Into<String>, parameters: Vec<Value>) -> Self {
        Self {
            query: query.into(),
            parameters,
            ..Self::default()
        }
    }

    pub fn with_per_page(mut self, per_page: impl Into<Value>) -> Self {
        self.per_page = Some(per_page.into());
        self
    }

    pub fn with_current_page(mut self, current_page: impl Into<Value>) -> Self {
        self.current_page = Some(current_page.into());
        self
    }

    /// Check page size and page number, producing typed settings
    pub fn settings(&self) -> Result<PageSettings, ConfigurationError> {
        let per_page = parse_per_page(self.per_page.as_ref())?;
        let current_page = parse_current_page(self.current_page.as_ref())?;
        PageSettings::new(per_page, current_page)
    }
}

fn parse_per_page(value: Option<&Value>) -> Result<u64, ConfigurationError> {
    let value = match value {
        None | Some(Value::Null) => return Err(ConfigurationError::missing_per_page()),
        Some(value) => value,
    };

    let Value::Number(number) = value else {
        return Err(ConfigurationError::invalid_per_page_type(value));
    };

    number
        .as_u64()
        .ok_or_else(|| ConfigurationError::invalid_per_page_range(value))
}

fn parse_current_page(value: Option<&Value>) -> Result<Option<u64>, ConfigurationError> {
    let Some(value) = value.filter(|v| !is_falsy(v)) else {
        return Ok(None);
    };

    let Value::Number(number) = value else {
        return Err(ConfigurationError::invalid_current_page_type(value));
    };

    number
        .as_u64()
        .map(Some)
        .ok_or_else(|| ConfigurationError::invalid_current_page_range(value))
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
