#![forbid(unsafe_code)]
//! Wire layer: DTOs, query-parameter parsing, and the machine-readable
//! error surface the HTTP handlers speak.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

mod dto;
mod error_mapping;

pub use dto::{ProductDto, ProductPageDto, ReviewDto};
pub use error_mapping::{map_catalog_error, status_code_for};

pub const CRATE_NAME: &str = "mercata-api";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ApiErrorCode {
    ValidationFailed,
    MissingIdentity,
    ProductNotFound,
    DuplicateReview,
    UnknownEndpoint,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Value,
}

impl ApiError {
    #[must_use]
    pub fn validation_failed(field: &str, reason: &str) -> Self {
        Self {
            code: ApiErrorCode::ValidationFailed,
            message: format!("invalid {field}"),
            details: json!({"field": field, "reason": reason}),
        }
    }

    #[must_use]
    pub fn missing_identity() -> Self {
        Self {
            code: ApiErrorCode::MissingIdentity,
            message: "caller identity required".to_string(),
            details: json!({"headers": ["x-user-id", "x-user-name"]}),
        }
    }

    #[must_use]
    pub fn product_not_found() -> Self {
        Self {
            code: ApiErrorCode::ProductNotFound,
            message: "product not found".to_string(),
            details: json!({}),
        }
    }

    #[must_use]
    pub fn duplicate_review() -> Self {
        Self {
            code: ApiErrorCode::DuplicateReview,
            message: "product already reviewed".to_string(),
            details: json!({}),
        }
    }

    #[must_use]
    pub fn unknown_endpoint(path: &str) -> Self {
        Self {
            code: ApiErrorCode::UnknownEndpoint,
            message: "unknown endpoint".to_string(),
            details: json!({"path": path}),
        }
    }

    /// Store-level failures surface as a generic internal error; the cause
    /// goes to the log, never to the client.
    #[must_use]
    pub fn internal() -> Self {
        Self {
            code: ApiErrorCode::Internal,
            message: "internal error".to_string(),
            details: json!({}),
        }
    }
}

pub mod params {
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ListProductsParams {
        pub keyword: Option<String>,
        pub page_number: i64,
    }

    /// Listing parameters never fail to parse: a blank keyword means no
    /// filter, and any absent, non-numeric, or non-positive `pageNumber`
    /// falls back to page 1 downstream.
    #[must_use]
    pub fn parse_list_products_params(query: &BTreeMap<String, String>) -> ListProductsParams {
        let keyword = query
            .get("keyword")
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .map(str::to_string);
        let page_number = query
            .get("pageNumber")
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(1);
        ListProductsParams {
            keyword,
            page_number,
        }
    }
}

/// Review submission body. `rating` arrives as raw JSON; the contract
/// coerces numeric strings, not just numbers.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReviewRequest {
    pub rating: Value,
    pub comment: String,
}

/// Accepts integral numbers and numeric strings; anything fractional or
/// non-numeric is rejected so the 1..=5 integer contract holds.
#[must_use]
pub fn coerce_rating(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i)
            } else {
                n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)
            }
        }
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::params::parse_list_products_params;
    use super::{coerce_rating, ApiError, ApiErrorCode};
    use serde_json::json;
    use std::collections::BTreeMap;

    fn query(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn list_params_default_to_first_page_and_no_keyword() {
        let parsed = parse_list_products_params(&query(&[]));
        assert_eq!(parsed.page_number, 1);
        assert_eq!(parsed.keyword, None);
    }

    #[test]
    fn list_params_pass_through_valid_values() {
        let parsed = parse_list_products_params(&query(&[("keyword", "lens"), ("pageNumber", "4")]));
        assert_eq!(parsed.page_number, 4);
        assert_eq!(parsed.keyword.as_deref(), Some("lens"));
    }

    #[test]
    fn list_params_treat_garbage_pages_as_one() {
        for raw in ["abc", "", "2.5", "1e3"] {
            let parsed = parse_list_products_params(&query(&[("pageNumber", raw)]));
            assert_eq!(parsed.page_number, 1, "raw={raw}");
        }
        // Negative numbers parse here; the catalog clamps them.
        let parsed = parse_list_products_params(&query(&[("pageNumber", "-2")]));
        assert_eq!(parsed.page_number, -2);
    }

    #[test]
    fn blank_keyword_is_dropped() {
        let parsed = parse_list_products_params(&query(&[("keyword", "   ")]));
        assert_eq!(parsed.keyword, None);
    }

    #[test]
    fn rating_coercion_accepts_integers_and_numeric_strings() {
        assert_eq!(coerce_rating(&json!(4)), Some(4));
        assert_eq!(coerce_rating(&json!(5.0)), Some(5));
        assert_eq!(coerce_rating(&json!("3")), Some(3));
        assert_eq!(coerce_rating(&json!(" 2 ")), Some(2));
    }

    #[test]
    fn rating_coercion_rejects_fractions_and_non_numbers() {
        assert_eq!(coerce_rating(&json!(4.5)), None);
        assert_eq!(coerce_rating(&json!("four")), None);
        assert_eq!(coerce_rating(&json!(null)), None);
        assert_eq!(coerce_rating(&json!([4])), None);
    }

    #[test]
    fn api_error_details_schema_stable() {
        let err = ApiError::validation_failed("rating", "out of range");
        assert_eq!(err.code, ApiErrorCode::ValidationFailed);
        assert!(err.details.get("field").is_some());
        assert!(err.details.get("reason").is_some());
    }
}
