// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use mercata_catalog::ProductPage;
use mercata_model::{Product, Review};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    pub user: String,
    pub name: String,
    pub rating: i64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Review> for ReviewDto {
    fn from(review: &Review) -> Self {
        Self {
            user: review.user.as_str().to_string(),
            name: review.name.clone(),
            rating: review.rating.value(),
            comment: review.comment.clone(),
            created_at: review.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub user: String,
    pub name: String,
    pub image: String,
    pub brand: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub count_in_stock: u32,
    pub rating: f64,
    pub num_reviews: u32,
    pub reviews: Vec<ReviewDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Product> for ProductDto {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_str().to_string(),
            user: product.user.as_str().to_string(),
            name: product.name.clone(),
            image: product.image.clone(),
            brand: product.brand.clone(),
            category: product.category.clone(),
            description: product.description.clone(),
            price: product.price,
            count_in_stock: product.count_in_stock,
            rating: product.rating,
            num_reviews: product.num_reviews,
            reviews: product.reviews.iter().map(ReviewDto::from).collect(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Listing response; field names are part of the wire contract.
#[derive(Debug, Clone, Serialize)]
pub struct ProductPageDto {
    pub products: Vec<ProductDto>,
    pub page: usize,
    pub pages: usize,
}

impl From<&ProductPage> for ProductPageDto {
    fn from(page: &ProductPage) -> Self {
        Self {
            products: page.items.iter().map(ProductDto::from).collect(),
            page: page.page,
            pages: page.total_pages,
        }
    }
}
