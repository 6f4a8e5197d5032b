#![forbid(unsafe_code)]
//! Collection store adapter.
//!
//! The catalog treats its persistence as a black-box document collection:
//! filtered count, filtered + sorted + paginated find, find-by-id, and
//! whole-document upsert. Backends implement [`ProductStore`]; everything
//! above this crate is backend-agnostic.

use async_trait::async_trait;
use mercata_model::{Product, ProductId};

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Opaque persistence failure. The adapter surfaces the cause as text and
/// callers propagate it unmodified; retry policy belongs to the backend.
#[derive(Debug)]
pub struct StoreError(pub String);

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "store error: {}", self.0)
    }
}

impl std::error::Error for StoreError {}

/// Filter a find/count applies before pagination. An empty filter matches
/// every document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring match against `name`.
    pub name_contains: Option<String>,
}

impl ProductFilter {
    #[must_use]
    pub fn name_contains(keyword: &str) -> Self {
        Self {
            name_contains: Some(keyword.to_string()),
        }
    }

    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match &self.name_contains {
            None => true,
            Some(keyword) => product
                .name
                .to_lowercase()
                .contains(&keyword.to_lowercase()),
        }
    }
}

/// Sort order for `find`. `Natural` is the store's own document order,
/// which both backends keep stable under upserts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortSpec {
    #[default]
    Natural,
    /// Descending rating; documents with equal ratings stay in natural
    /// order.
    RatingDesc,
}

#[async_trait]
pub trait ProductStore: Send + Sync + 'static {
    async fn count(&self, filter: &ProductFilter) -> Result<usize, StoreError>;

    async fn find(
        &self,
        filter: &ProductFilter,
        sort: SortSpec,
        skip: usize,
        limit: Option<usize>,
    ) -> Result<Vec<Product>, StoreError>;

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, StoreError>;

    /// Whole-document upsert. An existing document keeps its position in
    /// the store's natural order.
    async fn save(&self, product: &Product) -> Result<(), StoreError>;

    /// Idempotent: deleting an absent id succeeds.
    async fn delete_by_id(&self, id: &ProductId) -> Result<(), StoreError>;
}
