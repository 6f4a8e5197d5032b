use crate::{ProductFilter, ProductStore, SortSpec, StoreError};
use async_trait::async_trait;
use mercata_model::{Product, ProductId};
use tokio::sync::Mutex;

/// In-memory backend. Default store for development and tests; documents
/// live in insertion order, which doubles as the natural sort order.
#[derive(Default)]
pub struct MemoryStore {
    products: Mutex<Vec<Product>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn window(mut items: Vec<Product>, sort: SortSpec, skip: usize, limit: Option<usize>) -> Vec<Product> {
    if sort == SortSpec::RatingDesc {
        // Stable sort: ties keep retrieval order.
        items.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    }
    let take = limit.unwrap_or(usize::MAX);
    items.into_iter().skip(skip).take(take).collect()
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn count(&self, filter: &ProductFilter) -> Result<usize, StoreError> {
        let products = self.products.lock().await;
        Ok(products.iter().filter(|p| filter.matches(p)).count())
    }

    async fn find(
        &self,
        filter: &ProductFilter,
        sort: SortSpec,
        skip: usize,
        limit: Option<usize>,
    ) -> Result<Vec<Product>, StoreError> {
        let products = self.products.lock().await;
        let matching: Vec<Product> = products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        Ok(window(matching, sort, skip, limit))
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        let products = self.products.lock().await;
        Ok(products.iter().find(|p| &p.id == id).cloned())
    }

    async fn save(&self, product: &Product) -> Result<(), StoreError> {
        let mut products = self.products.lock().await;
        match products.iter_mut().find(|p| p.id == product.id) {
            Some(slot) => *slot = product.clone(),
            None => products.push(product.clone()),
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &ProductId) -> Result<(), StoreError> {
        let mut products = self.products.lock().await;
        products.retain(|p| &p.id != id);
        Ok(())
    }
}
