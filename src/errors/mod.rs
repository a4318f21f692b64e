use serde_json::{Value, json};
use std::fmt;
use thiserror::Error;

/// Component identifier carried in every configuration error code
pub const COMPONENT: &str = "PAGINATOR";

/// HTTP-style status hint for rejected constructor arguments
pub const BAD_REQUEST: u16 = 400;

/// Short failure tag identifying why construction was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureTag {
    MissingRequiredPerPage,
    InvalidTypePerPage,
    InvalidRangePerPage,
    InvalidTypeCurrentPage,
    InvalidRangeCurrentPage,
}

impl FailureTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureTag::MissingRequiredPerPage => "MISSING_REQUIRED_PER_PAGE",
            FailureTag::InvalidTypePerPage => "INVALID_TYPE_PER_PAGE",
            FailureTag::InvalidRangePerPage => "INVALID_RANGE_PER_PAGE",
            FailureTag::InvalidTypeCurrentPage => "INVALID_TYPE_CURRENT_PAGE",
            FailureTag::InvalidRangeCurrentPage => "INVALID_RANGE_CURRENT_PAGE",
        }
    }
}

impl fmt::Display for FailureTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Machine-readable error code, rendered as `COMPONENT.TAG`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode {
    pub component: &'static str,
    pub tag: FailureTag,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.component, self.tag)
    }
}

/// Rejected paginator construction.
///
/// Raised synchronously before any query runs. The instance cannot be
/// repaired; callers branch on `code.tag` and construct again.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ConfigurationError {
    pub message: String,
    pub code: ErrorCode,
    pub status: u16,
    pub context: Value,
}

impl ConfigurationError {
    fn new(tag: FailureTag, message: impl Into<String>, context: Value) -> Self {
        Self {
            message: message.into(),
            code: ErrorCode {
                component: COMPONENT,
                tag,
            },
            status: BAD_REQUEST,
            context,
        }
    }

    pub fn missing_per_page() -> Self {
        Self::new(
            FailureTag::MissingRequiredPerPage,
            "A page size (per_page) is required",
            json!({ "per_page": Value::Null }),
        )
    }

    pub fn invalid_per_page_type(value: &Value) -> Self {
        Self::new(
            FailureTag::InvalidTypePerPage,
            format!("Page size must be a number, got {}", describe(value)),
            json!({ "per_page": value }),
        )
    }

    pub fn invalid_per_page_range(value: &Value) -> Self {
        Self::new(
            FailureTag::InvalidRangePerPage,
            format!("Page size must be a positive integer, got {value}"),
            json!({ "per_page": value }),
        )
    }

    pub fn invalid_current_page_type(value: &Value) -> Self {
        Self::new(
            FailureTag::InvalidTypeCurrentPage,
            format!("Page number must be a number, got {}", describe(value)),
            json!({ "current_page": value }),
        )
    }

    pub fn invalid_current_page_range(value: &Value) -> Self {
        Self::new(
            FailureTag::InvalidRangeCurrentPage,
            format!("Page number must be a non-negative integer, got {value}"),
            json!({ "current_page": value }),
        )
    }

    pub fn tag(&self) -> FailureTag {
        self.code.tag
    }
}

fn describe(value: &Value) -> String {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    format!("{kind} {value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_combines_component_and_tag() {
        let error = ConfigurationError::missing_per_page();

        assert_eq!(error.code.to_string(), "PAGINATOR.MISSING_REQUIRED_PER_PAGE");
        assert_eq!(error.tag(), FailureTag::MissingRequiredPerPage);
        assert_eq!(error.status, 400);
    }

    #[test]
    fn test_context_carries_offending_value() {
        let value = json!("ten");
        let error = ConfigurationError::invalid_per_page_type(&value);

        assert_eq!(error.context, json!({ "per_page": "ten" }));
        assert_eq!(error.to_string(), "Page size must be a number, got string \"ten\"");
    }

    #[test]
    fn test_current_page_errors_use_their_own_tags() {
        let error = ConfigurationError::invalid_current_page_type(&json!(true));
        assert_eq!(error.code.to_string(), "PAGINATOR.INVALID_TYPE_CURRENT_PAGE");

        let error = ConfigurationError::invalid_current_page_range(&json!(-2));
        assert_eq!(error.code.to_string(), "PAGINATOR.INVALID_RANGE_CURRENT_PAGE");
        assert_eq!(error.context, json!({ "current_page": -2 }));
    }
}
