use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use vendo_core::cart::{Cart, CartDraft, CartLine};
use vendo_core::repository::CartRepository;

pub struct SqliteCartRepository {
    pool: SqlitePool,
}

impl SqliteCartRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CartRow {
    id: i64,
    items: String,
    total_amount: f64,
    total_items: i64,
    created_at: String,
    updated_at: String,
}

impl CartRow {
    // The line list is a JSON blob; deserialization preserves line order.
    fn decode(self) -> Result<Cart, Box<dyn std::error::Error + Send + Sync>> {
        let items: Vec<CartLine> = serde_json::from_str(&self.items)?;
        Ok(Cart {
            id: self.id,
            items,
            total_amount: self.total_amount,
            total_items: self.total_items,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}

#[async_trait]
impl CartRepository for SqliteCartRepository {
    async fn insert(
        &self,
        draft: &CartDraft,
    ) -> Result<Cart, Box<dyn std::error::Error + Send + Sync>> {
        let now = Utc::now();
        let items_json = serde_json::to_string(&draft.items)?;

        let result = sqlx::query(
            "INSERT INTO carts (items, total_amount, total_items, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&items_json)
        .bind(draft.total_amount)
        .bind(draft.total_items)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(Cart {
            id: result.last_insert_rowid(),
            items: draft.items.clone(),
            total_amount: draft.total_amount,
            total_items: draft.total_items,
            created_at: now,
            updated_at: now,
        })
    }

    async fn get(
        &self,
        id: i64,
    ) -> Result<Option<Cart>, Box<dyn std::error::Error + Send + Sync>> {
        let row: Option<CartRow> = sqlx::query_as(
            "SELECT id, items, total_amount, total_items, created_at, updated_at \
             FROM carts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(CartRow::decode).transpose()
    }

    async fn replace(
        &self,
        id: i64,
        draft: &CartDraft,
    ) -> Result<Option<Cart>, Box<dyn std::error::Error + Send + Sync>> {
        let now = Utc::now();
        let items_json = serde_json::to_string(&draft.items)?;

        let result = sqlx::query(
            "UPDATE carts SET items = ?, total_amount = ?, total_items = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(&items_json)
        .bind(draft.total_amount)
        .bind(draft.total_items)
        .bind(now.to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        database::init_schema(&pool).await.unwrap();
        pool
    }

    fn line(product_id: i64, name: &str, price: f64, qty: i64) -> CartLine {
        CartLine {
            product_id,
            name: name.to_string(),
            price,
            qty,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_monotonic_ids() {
        let repo = SqliteCartRepository::new(memory_pool().await);
        let draft = CartDraft::from_lines(vec![line(1, "A", 1.0, 1)]);

        let first = repo.insert(&draft).await.unwrap();
        let second = repo.insert(&draft).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_line_order_round_trips_through_storage() {
        let repo = SqliteCartRepository::new(memory_pool().await);
        let draft = CartDraft::from_lines(vec![
            line(9, "B", 2.0, 1),
            line(3, "A", 1.0, 2),
            line(9, "B", 2.0, 4),
        ]);

        let cart = repo.insert(&draft).await.unwrap();
        let fetched = repo.get(cart.id).await.unwrap().unwrap();

        let ids: Vec<i64> = fetched.items.iter().map(|l| l.product_id).collect();
        assert_eq!(ids, vec![9, 3, 9]);
        assert_eq!(fetched.total_amount, draft.total_amount);
        assert_eq!(fetched.total_items, draft.total_items);
    }

    #[tokio::test]
    async fn test_replace_overwrites_lines_and_keeps_created_at() {
        let repo = SqliteCartRepository::new(memory_pool().await);
        let cart = repo
            .insert(&CartDraft::from_lines(vec![line(1, "A", 1.0, 1)]))
            .await
            .unwrap();

        let replaced = repo
            .replace(cart.id, &CartDraft::from_lines(vec![line(2, "B", 3.0, 2)]))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(replaced.id, cart.id);
        assert_eq!(replaced.items.len(), 1);
        assert_eq!(replaced.items[0].product_id, 2);
        assert_eq!(replaced.total_amount, 6.0);
        assert_eq!(replaced.created_at, cart.created_at);
        assert!(replaced.updated_at >= cart.updated_at);
    }

    #[tokio::test]
    async fn test_replace_missing_cart_is_none() {
        let repo = SqliteCartRepository::new(memory_pool().await);
        let draft = CartDraft::from_lines(Vec::new());

        assert!(repo.replace(42, &draft).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let repo = SqliteCartRepository::new(memory_pool().await);
        assert!(repo.get(1).await.unwrap().is_none());
    }
}
