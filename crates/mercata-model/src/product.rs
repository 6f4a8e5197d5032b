// SPDX-License-Identifier: Apache-2.0

use crate::{ProductId, Review, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const NAME_MAX_LEN: usize = 256;

/// A catalog entry. The whole aggregate lives in one store document,
/// reviews included.
///
/// Invariants after every successful write:
/// - `num_reviews == reviews.len()`
/// - `rating` is the arithmetic mean of `reviews[*].rating`, 0 when empty
/// - no two reviews share a `user`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    /// Owner attribution, not an authorization check.
    pub user: UserId,
    pub name: String,
    pub image: String,
    pub brand: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub count_in_stock: u32,
    pub rating: f64,
    pub num_reviews: u32,
    pub reviews: Vec<Review>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Re-derives `num_reviews` and `rating` from the review list. Always a
    /// full recompute over every review, never an incremental adjustment,
    /// so a document whose aggregates drifted heals on its next write.
    pub fn recompute_rating(&mut self) {
        self.num_reviews = self.reviews.len() as u32;
        self.rating = if self.reviews.is_empty() {
            0.0
        } else {
            let total: i64 = self.reviews.iter().map(|r| r.rating.value()).sum();
            total as f64 / self.reviews.len() as f64
        };
    }

    #[must_use]
    pub fn has_review_by(&self, user: &UserId) -> bool {
        self.reviews.iter().any(|r| &r.user == user)
    }
}

/// Fields a catalog update overwrites unconditionally. Aggregate fields
/// (`rating`, `num_reviews`, `reviews`) are never writable this way.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub image: String,
    pub brand: String,
    pub category: String,
    pub count_in_stock: u32,
}

impl ProductPatch {
    pub fn apply(self, product: &mut Product) {
        product.name = self.name;
        product.price = self.price;
        product.description = self.description;
        product.image = self.image;
        product.brand = self.brand;
        product.category = self.category;
        product.count_in_stock = self.count_in_stock;
    }
}

/// Two-phase creation: a draft with defaulted fields is materialized into a
/// `Product` once it gets an id, instead of persisting a half-formed entity
/// and mutating it afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub owner: UserId,
    pub name: String,
    pub image: String,
    pub brand: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub count_in_stock: u32,
}

impl ProductDraft {
    /// The scaffold entry a create call persists before the real catalog
    /// data arrives via update.
    #[must_use]
    pub fn placeholder(owner: UserId) -> Self {
        Self {
            owner,
            name: "Sample name".to_string(),
            image: "/images/sample.jpg".to_string(),
            brand: "Sample brand".to_string(),
            category: "Sample category".to_string(),
            description: "Sample Description".to_string(),
            price: 0.0,
            count_in_stock: 0,
        }
    }

    #[must_use]
    pub fn into_product(self, id: ProductId, at: DateTime<Utc>) -> Product {
        Product {
            id,
            user: self.owner,
            name: self.name,
            image: self.image,
            brand: self.brand,
            category: self.category,
            description: self.description,
            price: self.price,
            count_in_stock: self.count_in_stock,
            rating: 0.0,
            num_reviews: 0,
            reviews: Vec::new(),
            created_at: at,
            updated_at: at,
        }
    }
}
