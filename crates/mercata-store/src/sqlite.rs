use crate::{ProductFilter, ProductStore, SortSpec, StoreError};
use async_trait::async_trait;
use mercata_model::{Product, ProductId};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// SQLite-backed document store. Each product is one row holding the JSON
/// document; `name` and `rating` are mirrored into columns so filter and
/// sort run in SQL. Rowid supplies the natural order, and the upsert keeps
/// the original rowid so updates do not reorder the collection.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS products (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    rating REAL NOT NULL,
    doc TEXT NOT NULL
);";

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|e| StoreError(e.to_string()))?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|e| StoreError(e.to_string()))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| StoreError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs a closure against the connection on the blocking pool; rusqlite
    /// is synchronous and must stay off the async workers.
    async fn with_conn<T, F>(&self, job: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, rusqlite::Error> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| StoreError("sqlite connection poisoned".to_string()))?;
            job(&guard).map_err(|e| StoreError(e.to_string()))
        })
        .await
        .map_err(|e| StoreError(format!("blocking task failed: {e}")))?
    }
}

// SQLite's lower() folds ASCII only; the keyword is folded the same way so
// both sides agree.
fn fold(keyword: &str) -> String {
    keyword.to_ascii_lowercase()
}

fn keyword_of(filter: &ProductFilter) -> String {
    filter.name_contains.as_deref().map(fold).unwrap_or_default()
}

fn order_clause(sort: SortSpec) -> &'static str {
    match sort {
        SortSpec::Natural => "rowid ASC",
        SortSpec::RatingDesc => "rating DESC, rowid ASC",
    }
}

fn decode_row(doc: String) -> Result<Product, rusqlite::Error> {
    serde_json::from_str(&doc).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

#[async_trait]
impl ProductStore for SqliteStore {
    async fn count(&self, filter: &ProductFilter) -> Result<usize, StoreError> {
        let keyword = keyword_of(filter);
        self.with_conn(move |conn| {
            let n: i64 = conn.query_row(
                "SELECT COUNT(*) FROM products WHERE ?1 = '' OR instr(lower(name), ?1) > 0",
                [&keyword],
                |row| row.get(0),
            )?;
            Ok(n as usize)
        })
        .await
    }

    async fn find(
        &self,
        filter: &ProductFilter,
        sort: SortSpec,
        skip: usize,
        limit: Option<usize>,
    ) -> Result<Vec<Product>, StoreError> {
        let keyword = keyword_of(filter);
        let limit = limit.map_or(-1i64, |l| l as i64);
        let skip = skip as i64;
        let sql = format!(
            "SELECT doc FROM products WHERE ?1 = '' OR instr(lower(name), ?1) > 0 \
             ORDER BY {} LIMIT ?2 OFFSET ?3",
            order_clause(sort)
        );
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(rusqlite::params![keyword, limit, skip], |row| {
                decode_row(row.get::<_, String>(0)?)
            })?;
            rows.collect()
        })
        .await
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        let id = id.as_str().to_string();
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare("SELECT doc FROM products WHERE id = ?1")?;
            let mut rows = stmt.query_map([&id], |row| decode_row(row.get::<_, String>(0)?))?;
            rows.next().transpose()
        })
        .await
    }

    async fn save(&self, product: &Product) -> Result<(), StoreError> {
        let id = product.id.as_str().to_string();
        let name = product.name.clone();
        let rating = product.rating;
        let doc = serde_json::to_string(product).map_err(|e| StoreError(e.to_string()))?;
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO products (id, name, rating, doc) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(id) DO UPDATE SET
                     name = excluded.name,
                     rating = excluded.rating,
                     doc = excluded.doc",
                rusqlite::params![id, name, rating, doc],
            )?;
            Ok(())
        })
        .await
    }

    async fn delete_by_id(&self, id: &ProductId) -> Result<(), StoreError> {
        let id = id.as_str().to_string();
        self.with_conn(move |conn| {
            conn.execute("DELETE FROM products WHERE id = ?1", [&id])?;
            Ok(())
        })
        .await
    }
}
