use serde_json::Value;
use sqlx::SqlitePool;
use tracing::{info, warn};

// Spreadsheet columns the loader recognizes. Anything missing defaults to
// an empty/zero value rather than failing the load.
const COL_GARMENT: &str = "TIPO_PRENDA";
const COL_SIZE: &str = "TALLA";
const COL_COLOR: &str = "COLOR";
const COL_CATEGORY: &str = "CATEGORÍA";
const COL_DESCRIPTION: &str = "DESCRIPCIÓN";
const COL_PRICE: &str = "PRECIO_50_U";
const COL_STOCK: &str = "CANTIDAD_DISPONIBLE";

/// Replace the whole catalog with the given tabular records (one JSON object
/// per spreadsheet row). Returns the number of products loaded.
pub async fn replace_catalog(pool: &SqlitePool, rows: &[Value]) -> Result<usize, sqlx::Error> {
    sqlx::query("DELETE FROM products").execute(pool).await?;

    let mut loaded = 0;
    for row in rows {
        let name = compose_name(row);
        let description = compose_description(row);
        let price = number_column(row, COL_PRICE).max(0.0);
        let stock = (number_column(row, COL_STOCK) as i64).max(0);

        sqlx::query("INSERT INTO products (name, description, price, stock) VALUES (?, ?, ?, ?)")
            .bind(&name)
            .bind(&description)
            .bind(price)
            .bind(stock)
            .execute(pool)
            .await?;
        loaded += 1;
    }

    info!(products = loaded, "catalog replaced");
    Ok(loaded)
}

/// Load the catalog from a JSON seed file. A missing file is logged and
/// skipped, never fatal.
pub async fn load_seed_file(
    pool: &SqlitePool,
    path: &str,
) -> Result<usize, Box<dyn std::error::Error + Send + Sync>> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            warn!(path, "no catalog seed file, keeping existing products");
            return Ok(0);
        }
        Err(err) => return Err(err.into()),
    };

    let rows: Vec<Value> = serde_json::from_str(&raw)?;
    Ok(replace_catalog(pool, &rows).await?)
}

fn compose_name(row: &Value) -> String {
    [COL_GARMENT, COL_SIZE, COL_COLOR]
        .iter()
        .map(|col| text_column(row, col))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn compose_description(row: &Value) -> String {
    let category = text_column(row, COL_CATEGORY);
    let description = text_column(row, COL_DESCRIPTION);
    match (category.is_empty(), description.is_empty()) {
        (true, _) => description,
        (_, true) => category,
        _ => format!("{} - {}", category, description),
    }
}

fn text_column(row: &Value, column: &str) -> String {
    match row.get(column) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn number_column(row: &Value, column: &str) -> f64 {
    match row.get(column) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database;
    use serde_json::json;
    use sqlx::sqlite::SqlitePoolOptions;
    use vendo_core::product::Product;

    async fn memory_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        database::init_schema(&pool).await.unwrap();
        pool
    }

    async fn all_products(pool: &SqlitePool) -> Vec<Product> {
        sqlx::query_as::<_, (i64, String, String, f64, i64)>(
            "SELECT id, name, description, price, stock FROM products ORDER BY id",
        )
        .fetch_all(pool)
        .await
        .unwrap()
        .into_iter()
        .map(|(id, name, description, price, stock)| Product {
            id,
            name,
            description,
            price,
            stock,
        })
        .collect()
    }

    #[tokio::test]
    async fn test_loads_recognized_columns() {
        let pool = memory_pool().await;
        let rows = vec![json!({
            "TIPO_PRENDA": "Camisa",
            "TALLA": "M",
            "COLOR": "Roja",
            "CATEGORÍA": "Ropa",
            "DESCRIPCIÓN": "algodón premium",
            "PRECIO_50_U": 10.5,
            "CANTIDAD_DISPONIBLE": 25,
        })];

        let loaded = replace_catalog(&pool, &rows).await.unwrap();
        assert_eq!(loaded, 1);

        let products = all_products(&pool).await;
        assert_eq!(products[0].name, "Camisa M Roja");
        assert_eq!(products[0].description, "Ropa - algodón premium");
        assert_eq!(products[0].price, 10.5);
        assert_eq!(products[0].stock, 25);
    }

    #[tokio::test]
    async fn test_missing_columns_default_to_empty_or_zero() {
        let pool = memory_pool().await;
        let rows = vec![json!({ "TIPO_PRENDA": "Gorra" })];

        replace_catalog(&pool, &rows).await.unwrap();

        let products = all_products(&pool).await;
        assert_eq!(products[0].name, "Gorra");
        assert_eq!(products[0].description, "");
        assert_eq!(products[0].price, 0.0);
        assert_eq!(products[0].stock, 0);
    }

    #[tokio::test]
    async fn test_numeric_strings_are_accepted() {
        let pool = memory_pool().await;
        let rows = vec![json!({
            "TIPO_PRENDA": "Pantalón",
            "PRECIO_50_U": "19.99",
            "CANTIDAD_DISPONIBLE": "7",
        })];

        replace_catalog(&pool, &rows).await.unwrap();

        let products = all_products(&pool).await;
        assert_eq!(products[0].price, 19.99);
        assert_eq!(products[0].stock, 7);
    }

    #[tokio::test]
    async fn test_reload_replaces_previous_catalog() {
        let pool = memory_pool().await;
        replace_catalog(&pool, &[json!({"TIPO_PRENDA": "Camisa"})])
            .await
            .unwrap();
        replace_catalog(&pool, &[json!({"TIPO_PRENDA": "Gorra"})])
            .await
            .unwrap();

        let products = all_products(&pool).await;
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Gorra");
    }

    #[tokio::test]
    async fn test_missing_seed_file_is_skipped() {
        let pool = memory_pool().await;
        let loaded = load_seed_file(&pool, "does-not-exist.json").await.unwrap();
        assert_eq!(loaded, 0);
    }
}
