use async_trait::async_trait;
use sqlx::SqlitePool;

use vendo_core::product::Product;
use vendo_core::repository::CatalogRepository;

pub struct SqliteCatalogRepository {
    pool: SqlitePool,
}

impl SqliteCatalogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: String,
    price: f64,
    stock: i64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            stock: row.stock,
        }
    }
}

#[async_trait]
impl CatalogRepository for SqliteCatalogRepository {
    async fn list(
        &self,
        filter: Option<&str>,
    ) -> Result<Vec<Product>, Box<dyn std::error::Error + Send + Sync>> {
        // SQLite LIKE is case-insensitive for ASCII, which is the match
        // behavior callers rely on.
        let rows: Vec<ProductRow> = if let Some(q) = filter {
            let pattern = format!("%{}%", q);
            sqlx::query_as(
                "SELECT id, name, description, price, stock FROM products \
                 WHERE name LIKE ? OR description LIKE ? ORDER BY id",
            )
            .bind(&pattern)
            .bind(&pattern)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as(
                "SELECT id, name, description, price, stock FROM products ORDER BY id",
            )
            .fetch_all(&self.pool)
            .await?
        };

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn get(
        &self,
        id: i64,
    ) -> Result<Option<Product>, Box<dyn std::error::Error + Send + Sync>> {
        let row: Option<ProductRow> = sqlx::query_as(
            "SELECT id, name, description, price, stock FROM products WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Product::from))
    }
}
