//! PostgreSQL cart store
//!
//! Each cart is one row; the item list is kept as a JSONB document so the
//! stored shape matches the API shape. `seq` records insertion order for the
//! natural-order lookups. No unique constraint guards the single active cart
//! per user.

use super::CartStore;
use crate::cart::models::{Cart, CartItem, CartStatus};
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS carts (
    id UUID PRIMARY KEY,
    seq BIGSERIAL NOT NULL,
    user_id TEXT NOT NULL,
    status TEXT NOT NULL,
    items JSONB NOT NULL DEFAULT '[]'::jsonb,
    updated_at TIMESTAMPTZ NOT NULL
)
"#;

const SELECT_COLUMNS: &str = "SELECT id, user_id, status, items, updated_at FROM carts";

#[derive(Debug, FromRow)]
struct CartRow {
    id: Uuid,
    user_id: String,
    status: String,
    items: Json<Vec<CartItem>>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CartRow> for Cart {
    type Error = StoreError;

    fn try_from(row: CartRow) -> Result<Self, Self::Error> {
        Ok(Cart {
            id: row.id,
            user_id: row.user_id,
            status: row.status.parse().map_err(StoreError::Backend)?,
            items: row.items.0,
            updated_at: row.updated_at,
        })
    }
}

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connects to `database_url` and creates the `carts` table if missing.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        tracing::info!("Connected to PostgreSQL cart store");
        Ok(store)
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CartStore for PgStore {
    async fn find_active(&self, user_id: &str) -> Result<Option<Cart>, StoreError> {
        let sql = format!(
            "{} WHERE user_id = $1 AND status = $2 ORDER BY seq LIMIT 1",
            SELECT_COLUMNS
        );
        let row: Option<CartRow> = sqlx::query_as(&sql)
            .bind(user_id)
            .bind(CartStatus::Active.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Cart::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Cart>, StoreError> {
        let sql = format!("{} ORDER BY seq", SELECT_COLUMNS);
        let rows: Vec<CartRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Cart::try_from).collect()
    }

    async fn save(&self, cart: &Cart) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO carts (id, user_id, status, items, updated_at) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (id) DO UPDATE SET \
                 user_id = EXCLUDED.user_id, \
                 status = EXCLUDED.status, \
                 items = EXCLUDED.items, \
                 updated_at = EXCLUDED.updated_at",
        )
        .bind(cart.id)
        .bind(&cart.user_id)
        .bind(cart.status.as_str())
        .bind(Json(&cart.items))
        .bind(cart.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str) -> CartRow {
        CartRow {
            id: Uuid::new_v4(),
            user_id: "U1".into(),
            status: status.into(),
            items: Json(vec![CartItem::new("P1", 2)]),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn row_converts_to_cart() {
        let row = row("active");
        let id = row.id;

        let cart = Cart::try_from(row).unwrap();

        assert_eq!(cart.id, id);
        assert_eq!(cart.status, CartStatus::Active);
        assert_eq!(cart.items, vec![CartItem::new("P1", 2)]);
    }

    #[test]
    fn unknown_status_is_a_backend_error() {
        let err = Cart::try_from(row("archived")).unwrap_err();
        assert!(err.to_string().contains("archived"));
    }
}
