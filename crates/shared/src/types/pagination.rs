//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Maximum number of items a single page may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Number of items per page.
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PageRequest {
    /// Checks the bounds accepted by list endpoints.
    ///
    /// # Errors
    ///
    /// Returns a message naming the offending parameter.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.page == 0 {
            return Err("page must be at least 1");
        }
        if self.limit == 0 || self.limit > MAX_PAGE_SIZE {
            return Err("limit must be between 1 and 100");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_are_first_page_of_ten() {
        let page = PageRequest::default();
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 10);
        assert!(page.validate().is_ok());
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let page: PageRequest = serde_json::from_str("{}").expect("should deserialize");
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 10);

        let page: PageRequest = serde_json::from_str(r#"{"limit":25}"#).expect("should deserialize");
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 25);
    }

    #[rstest]
    #[case(1, 1)]
    #[case(1, 100)]
    #[case(500, 10)]
    fn in_range_requests_validate(#[case] page: u32, #[case] limit: u32) {
        assert!(PageRequest { page, limit }.validate().is_ok());
    }

    #[rstest]
    #[case(0, 10, "page must be at least 1")]
    #[case(1, 0, "limit must be between 1 and 100")]
    #[case(1, 101, "limit must be between 1 and 100")]
    fn out_of_range_requests_are_rejected(
        #[case] page: u32,
        #[case] limit: u32,
        #[case] expected: &str,
    ) {
        assert_eq!(PageRequest { page, limit }.validate(), Err(expected));
    }
}
