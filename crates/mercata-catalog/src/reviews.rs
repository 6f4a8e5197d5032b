use crate::locks::IdLockArena;
use crate::CatalogError;
use chrono::Utc;
use mercata_model::{ProductId, Rating, Review, Reviewer};
use mercata_store::ProductStore;
use std::sync::Arc;
use tracing::info;

/// Appends reviews and keeps a product's derived rating consistent.
pub struct ReviewAggregator {
    store: Arc<dyn ProductStore>,
    locks: Arc<IdLockArena>,
}

impl ReviewAggregator {
    #[must_use]
    pub fn new(store: Arc<dyn ProductStore>, locks: Arc<IdLockArena>) -> Self {
        Self { store, locks }
    }

    /// One review per (user, product). On success the review list grows by
    /// one, `num_reviews` is the new length, and `rating` is the mean over
    /// all reviews recomputed from scratch; the whole document is then
    /// saved. The per-product lock spans the read and the save, so two
    /// concurrent submissions cannot drop each other's review.
    pub async fn add_review(
        &self,
        product_id: &ProductId,
        reviewer: Reviewer,
        rating: Rating,
        comment: String,
    ) -> Result<(), CatalogError> {
        let _guard = self.locks.acquire(product_id).await;

        let mut product = self
            .store
            .find_by_id(product_id)
            .await?
            .ok_or(CatalogError::NotFound)?;

        if product.has_review_by(&reviewer.id) {
            return Err(CatalogError::DuplicateReview);
        }

        let now = Utc::now();
        product
            .reviews
            .push(Review::new(reviewer, rating, comment, now));
        product.recompute_rating();
        product.updated_at = now;
        self.store.save(&product).await?;

        info!(
            product = %product.id,
            num_reviews = product.num_reviews,
            rating = product.rating,
            "review added"
        );
        Ok(())
    }
}
