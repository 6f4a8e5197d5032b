use crate::locks::IdLockArena;
use crate::CatalogError;
use chrono::Utc;
use mercata_model::{Product, ProductDraft, ProductId, ProductPatch, UserId};
use mercata_store::{ProductFilter, ProductStore, SortSpec};
use std::sync::Arc;
use tracing::{debug, info};

/// Fixed window size for catalog listings.
pub const PAGE_SIZE: usize = 10;

/// Default result count for the top-rated selector.
pub const DEFAULT_TOP_RATED: usize = 3;

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    pub items: Vec<Product>,
    /// The effective page number after clamping.
    pub page: usize,
    /// `ceil(matching / PAGE_SIZE)`; 0 when nothing matches.
    pub total_pages: usize,
}

pub struct CatalogService {
    store: Arc<dyn ProductStore>,
    locks: Arc<IdLockArena>,
}

fn keyword_filter(keyword: Option<&str>) -> ProductFilter {
    match keyword.map(str::trim) {
        Some(keyword) if !keyword.is_empty() => ProductFilter::name_contains(keyword),
        _ => ProductFilter::default(),
    }
}

/// Any non-positive page is treated as page 1. Pages past the end stay as
/// given and come back with an empty window.
fn clamp_page(page: i64) -> usize {
    if page < 1 {
        1
    } else {
        page as usize
    }
}

impl CatalogService {
    #[must_use]
    pub fn new(store: Arc<dyn ProductStore>, locks: Arc<IdLockArena>) -> Self {
        Self { store, locks }
    }

    /// Paginated, keyword-filtered listing in the store's natural order.
    /// Never fails for an out-of-range page.
    pub async fn list(
        &self,
        keyword: Option<&str>,
        page: i64,
    ) -> Result<ProductPage, CatalogError> {
        let filter = keyword_filter(keyword);
        let page = clamp_page(page);

        let matching = self.store.count(&filter).await?;
        let total_pages = matching.div_ceil(PAGE_SIZE);
        let items = self
            .store
            .find(
                &filter,
                SortSpec::Natural,
                PAGE_SIZE * (page - 1),
                Some(PAGE_SIZE),
            )
            .await?;
        debug!(page, total_pages, matching, "catalog list");
        Ok(ProductPage {
            items,
            page,
            total_pages,
        })
    }

    pub async fn get(&self, id: &ProductId) -> Result<Product, CatalogError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound)
    }

    /// Idempotent: succeeds whether or not the id exists.
    pub async fn delete(&self, id: &ProductId) -> Result<(), CatalogError> {
        let _guard = self.locks.acquire(id).await;
        self.store.delete_by_id(id).await?;
        info!(product = %id, "product deleted");
        Ok(())
    }

    /// Persists a placeholder entry owned by `owner`, the scaffold for a
    /// follow-up [`CatalogService::update`].
    pub async fn create_draft(&self, owner: UserId) -> Result<Product, CatalogError> {
        let product = ProductDraft::placeholder(owner).into_product(ProductId::generate(), Utc::now());
        self.store.save(&product).await?;
        info!(product = %product.id, "placeholder product created");
        Ok(product)
    }

    /// Overwrites every patch field unconditionally and persists the whole
    /// document.
    pub async fn update(
        &self,
        id: &ProductId,
        patch: ProductPatch,
    ) -> Result<Product, CatalogError> {
        let _guard = self.locks.acquire(id).await;
        let mut product = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound)?;
        patch.apply(&mut product);
        product.updated_at = Utc::now();
        self.store.save(&product).await?;
        info!(product = %product.id, "product updated");
        Ok(product)
    }

    /// Up to `n` products by descending rating; ties keep the store's
    /// natural order.
    pub async fn top_rated(&self, n: usize) -> Result<Vec<Product>, CatalogError> {
        Ok(self
            .store
            .find(&ProductFilter::default(), SortSpec::RatingDesc, 0, Some(n))
            .await?)
    }
}
