// SPDX-License-Identifier: Apache-2.0

use crate::{ApiError, ApiErrorCode};
use mercata_catalog::CatalogError;

/// HTTP status for each error code. `Internal` deliberately carries no
/// detail about the store failure that produced it.
#[must_use]
pub fn status_code_for(code: ApiErrorCode) -> u16 {
    match code {
        ApiErrorCode::ValidationFailed | ApiErrorCode::DuplicateReview => 400,
        ApiErrorCode::MissingIdentity => 401,
        ApiErrorCode::ProductNotFound | ApiErrorCode::UnknownEndpoint => 404,
        _ => 500,
    }
}

#[must_use]
pub fn map_catalog_error(err: &CatalogError) -> ApiError {
    match err {
        CatalogError::NotFound => ApiError::product_not_found(),
        CatalogError::DuplicateReview => ApiError::duplicate_review(),
        _ => ApiError::internal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mercata_store::StoreError;

    #[test]
    fn catalog_errors_map_to_contract_statuses() {
        let cases = [
            (CatalogError::NotFound, 404),
            (CatalogError::DuplicateReview, 400),
            (CatalogError::Store(StoreError("socket closed".to_string())), 500),
        ];
        for (err, status) in cases {
            let api = map_catalog_error(&err);
            assert_eq!(status_code_for(api.code), status);
        }
    }

    #[test]
    fn internal_error_does_not_leak_store_detail() {
        let err = CatalogError::Store(StoreError("dsn=secret@host".to_string()));
        let api = map_catalog_error(&err);
        assert!(!api.message.contains("secret"));
        assert_eq!(api.details, serde_json::json!({}));
    }
}
