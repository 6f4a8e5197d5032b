//! Property checks for the pagination arithmetic: page totals follow
//! ceiling division and the page windows partition the matching set.

use mercata_catalog::{locks::IdLockArena, CatalogService, PAGE_SIZE};
use mercata_model::UserId;
use mercata_store::{MemoryStore, ProductStore};
use proptest::prelude::*;
use std::sync::Arc;

fn catalog_with(count: usize) -> (tokio::runtime::Runtime, CatalogService) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime");
    let store: Arc<dyn ProductStore> = Arc::new(MemoryStore::new());
    let catalog = CatalogService::new(store, Arc::new(IdLockArena::new()));
    rt.block_on(async {
        for _ in 0..count {
            catalog
                .create_draft(UserId::parse("owner").expect("owner"))
                .await
                .expect("create");
        }
    });
    (rt, catalog)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn total_pages_is_ceiling_division(count in 0usize..60) {
        let (rt, catalog) = catalog_with(count);
        let page = rt.block_on(catalog.list(None, 1)).expect("list");
        prop_assert_eq!(page.total_pages, count.div_ceil(PAGE_SIZE));
    }

    #[test]
    fn windows_partition_the_matching_set(count in 0usize..60) {
        let (rt, catalog) = catalog_with(count);
        let total_pages = rt.block_on(catalog.list(None, 1)).expect("list").total_pages;

        let mut seen = 0usize;
        for page_no in 1..=total_pages.max(1) {
            let page = rt.block_on(catalog.list(None, page_no as i64)).expect("list");
            prop_assert!(page.items.len() <= PAGE_SIZE);
            if page_no < total_pages {
                prop_assert_eq!(page.items.len(), PAGE_SIZE);
            }
            seen += page.items.len();
        }
        prop_assert_eq!(seen, count);

        let beyond = rt
            .block_on(catalog.list(None, (total_pages + 1) as i64))
            .expect("list");
        prop_assert!(beyond.items.is_empty());
        prop_assert_eq!(beyond.total_pages, total_pages);
    }

    #[test]
    fn invalid_pages_clamp_to_first_window(raw in -20i64..1) {
        let (rt, catalog) = catalog_with(5);
        let page = rt.block_on(catalog.list(None, raw)).expect("list");
        prop_assert_eq!(page.page, 1);
        prop_assert_eq!(page.items.len(), 5);
    }
}
