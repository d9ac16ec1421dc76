//! Terminal-local relational store
//!
//! Embedded SQLite holding `orders` and `menu_items`. It lives next to the
//! menu sync layer and is not fed by it.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

use shared::price::{OrderLine, OrderTotals};
use shared::util::{now_millis, order_id};
use shared::{MenuItem, Order, OrderStatus};

/// Local store error type
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

const CREATE_ORDERS: &str = "CREATE TABLE IF NOT EXISTS orders (
    id TEXT PRIMARY KEY NOT NULL,
    terminal_id TEXT NOT NULL,
    staff_id TEXT NOT NULL,
    subtotal REAL NOT NULL,
    tax REAL NOT NULL,
    total REAL NOT NULL,
    status TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
)";

const CREATE_MENU_ITEMS: &str = "CREATE TABLE IF NOT EXISTS menu_items (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    category_id TEXT NOT NULL,
    price REAL NOT NULL,
    tax_rate REAL NOT NULL,
    is_available INTEGER NOT NULL DEFAULT 1
)";

const ORDER_COLUMNS: &str =
    "id, terminal_id, staff_id, subtotal, tax, total, status, created_at, updated_at";

/// SQLite-backed store for orders and menu items
#[derive(Debug, Clone)]
pub struct LocalStore {
    pool: SqlitePool,
}

impl LocalStore {
    /// Open (creating if missing) the database at `url` and ensure the schema
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await?;
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Private in-memory database, gone when the store is dropped
    pub async fn in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        // one connection, never recycled: each connection has its own memory db
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Create tables if they do not exist
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::query(CREATE_ORDERS).execute(&self.pool).await?;
        sqlx::query(CREATE_MENU_ITEMS).execute(&self.pool).await?;
        Ok(())
    }

    // ========== Orders ==========

    /// Open a new order with totals computed from its lines
    pub async fn create_order(
        &self,
        terminal_id: &str,
        staff_id: &str,
        lines: &[OrderLine],
    ) -> StoreResult<Order> {
        let totals = OrderTotals::compute(lines);
        let now = now_millis();
        let order = Order {
            id: order_id(),
            terminal_id: terminal_id.to_string(),
            staff_id: staff_id.to_string(),
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
            status: OrderStatus::Open,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO orders (id, terminal_id, staff_id, subtotal, tax, total, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&order.id)
        .bind(&order.terminal_id)
        .bind(&order.staff_id)
        .bind(order.subtotal)
        .bind(order.tax)
        .bind(order.total)
        .bind(order.status)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(order_id = %order.id, total = order.total, "Order stored");
        Ok(order)
    }

    pub async fn get_order(&self, id: &str) -> StoreResult<Option<Order>> {
        let sql = format!("SELECT {} FROM orders WHERE id = ?", ORDER_COLUMNS);
        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(order)
    }

    /// All orders, oldest first
    pub async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        let sql = format!(
            "SELECT {} FROM orders ORDER BY created_at, rowid",
            ORDER_COLUMNS
        );
        let orders = sqlx::query_as::<_, Order>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(orders)
    }

    pub async fn update_order_status(&self, id: &str, status: OrderStatus) -> StoreResult<Order> {
        let result = sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status)
            .bind(now_millis())
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("Order {}", id)));
        }
        self.get_order(id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("Order {}", id)))
    }

    // ========== Menu items ==========

    /// Insert or overwrite by id (last write wins)
    pub async fn upsert_menu_item(&self, item: &MenuItem) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO menu_items (id, name, category_id, price, tax_rate, is_available)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                category_id = excluded.category_id,
                price = excluded.price,
                tax_rate = excluded.tax_rate,
                is_available = excluded.is_available",
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(&item.category_id)
        .bind(item.price)
        .bind(item.tax_rate)
        .bind(item.is_available)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn list_menu_items(&self) -> StoreResult<Vec<MenuItem>> {
        let items = sqlx::query_as::<_, MenuItem>(
            "SELECT id, name, category_id, price, tax_rate, is_available FROM menu_items ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn set_menu_item_availability(&self, id: &str, available: bool) -> StoreResult<()> {
        let result = sqlx::query("UPDATE menu_items SET is_available = ? WHERE id = ?")
            .bind(available)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("Menu item {}", id)));
        }
        Ok(())
    }
}
