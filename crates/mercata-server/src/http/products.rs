use super::{api_error_response, caller_identity, request_id, with_request_id};
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use mercata_api::params::parse_list_products_params;
use mercata_api::{
    coerce_rating, map_catalog_error, ApiError, CreateReviewRequest, ProductDto, ProductPageDto,
};
use mercata_catalog::CatalogError;
use mercata_model::{ProductId, ProductPatch, Rating};
use serde_json::json;
use std::collections::BTreeMap;
use tracing::{error, info};

fn catalog_error_response(err: &CatalogError) -> Response {
    if let CatalogError::Store(cause) = err {
        error!(%cause, "store failure");
    }
    api_error_response(map_catalog_error(err))
}

fn parse_product_id(raw: &str) -> Result<ProductId, Response> {
    ProductId::parse(raw)
        .map_err(|err| api_error_response(ApiError::validation_failed("id", &err.to_string())))
}

pub(crate) async fn list_products(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(raw): Query<BTreeMap<String, String>>,
) -> Response {
    let rid = request_id(&headers);
    let params = parse_list_products_params(&raw);
    let result = state
        .catalog
        .list(params.keyword.as_deref(), params.page_number)
        .await;
    let response = match result {
        Ok(page) => (StatusCode::OK, Json(ProductPageDto::from(&page))).into_response(),
        Err(err) => catalog_error_response(&err),
    };
    with_request_id(response, &rid)
}

pub(crate) async fn top_products(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let rid = request_id(&headers);
    let response = match state.catalog.top_rated(state.api.top_rated_count).await {
        Ok(products) => {
            let dtos: Vec<ProductDto> = products.iter().map(ProductDto::from).collect();
            (StatusCode::OK, Json(dtos)).into_response()
        }
        Err(err) => catalog_error_response(&err),
    };
    with_request_id(response, &rid)
}

pub(crate) async fn get_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let rid = request_id(&headers);
    let response = match parse_product_id(&id) {
        Err(response) => response,
        Ok(id) => match state.catalog.get(&id).await {
            Ok(product) => (StatusCode::OK, Json(ProductDto::from(&product))).into_response(),
            Err(err) => catalog_error_response(&err),
        },
    };
    with_request_id(response, &rid)
}

pub(crate) async fn create_product(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let rid = request_id(&headers);
    let Some(identity) = caller_identity(&headers) else {
        return with_request_id(api_error_response(ApiError::missing_identity()), &rid);
    };
    let response = match state.catalog.create_draft(identity.id).await {
        Ok(product) => {
            info!(request_id = %rid, product = %product.id, "product created");
            (StatusCode::CREATED, Json(ProductDto::from(&product))).into_response()
        }
        Err(err) => catalog_error_response(&err),
    };
    with_request_id(response, &rid)
}

pub(crate) async fn update_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(patch): Json<ProductPatch>,
) -> Response {
    let rid = request_id(&headers);
    if caller_identity(&headers).is_none() {
        return with_request_id(api_error_response(ApiError::missing_identity()), &rid);
    }
    let response = match parse_product_id(&id) {
        Err(response) => response,
        Ok(id) => match state.catalog.update(&id, patch).await {
            Ok(product) => (StatusCode::CREATED, Json(ProductDto::from(&product))).into_response(),
            Err(err) => catalog_error_response(&err),
        },
    };
    with_request_id(response, &rid)
}

pub(crate) async fn delete_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let rid = request_id(&headers);
    if caller_identity(&headers).is_none() {
        return with_request_id(api_error_response(ApiError::missing_identity()), &rid);
    }
    let response = match parse_product_id(&id) {
        Err(response) => response,
        Ok(id) => match state.catalog.delete(&id).await {
            Ok(()) => StatusCode::NO_CONTENT.into_response(),
            Err(err) => catalog_error_response(&err),
        },
    };
    with_request_id(response, &rid)
}

pub(crate) async fn create_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<CreateReviewRequest>,
) -> Response {
    let rid = request_id(&headers);
    let Some(reviewer) = caller_identity(&headers) else {
        return with_request_id(api_error_response(ApiError::missing_identity()), &rid);
    };

    let response = match parse_product_id(&id) {
        Err(response) => response,
        Ok(id) => {
            let rating = coerce_rating(&body.rating)
                .ok_or_else(|| ApiError::validation_failed("rating", "not an integer"))
                .and_then(|value| {
                    Rating::new(value)
                        .map_err(|err| ApiError::validation_failed("rating", &err.to_string()))
                });
            match rating {
                Err(err) => api_error_response(err),
                Ok(rating) => {
                    match state
                        .reviews
                        .add_review(&id, reviewer, rating, body.comment)
                        .await
                    {
                        Ok(()) => (
                            StatusCode::CREATED,
                            Json(json!({ "message": "Review added" })),
                        )
                            .into_response(),
                        Err(err) => catalog_error_response(&err),
                    }
                }
            }
        }
    };
    with_request_id(response, &rid)
}

pub(crate) async fn unknown_endpoint(uri: Uri) -> Response {
    api_error_response(ApiError::unknown_endpoint(uri.path()))
}
