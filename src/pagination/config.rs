use log::debug;
use serde_json::Value;

use crate::errors::ConfigurationError;

/// Page number used when none (or a falsy one) is supplied
pub const DEFAULT_PAGE: u64 = 1;

/// Validated page size and page number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSettings {
    pub per_page: u64,
    pub current_page: u64,
}

impl PageSettings {
    /// Validate typed arguments. A page number of `0` is treated as omitted.
    pub fn new(per_page: u64, current_page: Option<u64>) -> Result<Self, ConfigurationError> {
        if per_page == 0 {
            return Err(ConfigurationError::invalid_per_page_range(&Value::from(per_page)));
        }

        Ok(Self {
            per_page,
            current_page: resolve_page(current_page),
        })
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page == DEFAULT_PAGE
    }
}

fn resolve_page(current_page: Option<u64>) -> u64 {
    match current_page {
        Some(0) => {
            debug!("Page number 0 requested, using page {}", DEFAULT_PAGE);
            DEFAULT_PAGE
        }
        Some(page) => page,
        None => DEFAULT_PAGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FailureTag;

    #[test]
    fn test_page_defaults_to_first() {
        let settings = PageSettings::new(10, None).unwrap();
        assert_eq!(settings.current_page, 1);
        assert!(settings.is_first_page());
    }

    #[test]
    fn test_page_zero_becomes_first_page() {
        let settings = PageSettings::new(10, Some(0)).unwrap();
        assert_eq!(settings.current_page, 1);
    }

    #[test]
    fn test_explicit_page_is_kept() {
        let settings = PageSettings::new(25, Some(7)).unwrap();
        assert_eq!(settings, PageSettings { per_page: 25, current_page: 7 });
        assert!(!settings.is_first_page());
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let error = PageSettings::new(0, Some(1)).unwrap_err();
        assert_eq!(error.tag(), FailureTag::InvalidRangePerPage);
    }
}
