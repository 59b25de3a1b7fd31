//! Order Repository
//!
//! Orders are append-and-transition only: rows are created at checkout and
//! mutated exclusively through status patches. Nothing here deletes an order.
//!
//! Number allocation is a single-statement atomic counter increment; the
//! unique index on `orderNumber` (see `db::DbService`) backstops it so two
//! concurrent checkouts can never share a number.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::order::OrderStatus;

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Order, OrderStatusPatch};

const TABLE: &str = "order";

/// Name of the unique index guarding `orderNumber` (defined at startup)
pub const ORDER_NUMBER_INDEX: &str = "uniq_order_number";

/// Listing filters for the admin order view
#[derive(Debug, Clone)]
pub struct OrderListFilter {
    pub status: Option<OrderStatus>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub limit: i64,
}

impl Default for OrderListFilter {
    fn default() -> Self {
        Self {
            status: None,
            start: None,
            end: None,
            limit: 50,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CounterRow {
    value: u64,
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Atomically allocate the next order sequence value
    ///
    /// The UPSERT executes as one statement, hence one transaction: two
    /// concurrent calls always observe distinct values.
    pub async fn next_sequence(&self) -> RepoResult<u64> {
        let mut result = self
            .base
            .db()
            .query("UPSERT order_counter:main SET value = (value ?? 0) + 1 RETURN AFTER")
            .await?;
        let rows: Vec<CounterRow> = result.take(0)?;
        rows.into_iter()
            .next()
            .map(|row| row.value)
            .ok_or_else(|| RepoError::Database("Order counter returned no row".to_string()))
    }

    /// Persist a new order
    ///
    /// A unique-index violation on `orderNumber` is reported as
    /// [`RepoError::Duplicate`] so the caller can retry with a fresh number.
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        match self.base.db().create(TABLE).content(order).await {
            Ok(Some(created)) => Ok(created),
            Ok(None) => Err(RepoError::Database("Failed to create order".to_string())),
            Err(err) => {
                let message = err.to_string();
                if message.contains(ORDER_NUMBER_INDEX) {
                    Err(RepoError::Duplicate(message))
                } else {
                    Err(RepoError::Database(message))
                }
            }
        }
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let record_id = parse_record_id(TABLE, id);
        let order: Option<Order> = self.base.db().select(record_id).await?;
        Ok(order)
    }

    /// Find order by its human-readable number
    pub async fn find_by_number(&self, order_number: &str) -> RepoResult<Option<Order>> {
        let number = order_number.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM order WHERE orderNumber = $number LIMIT 1")
            .bind(("number", number))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Find orders matching the filter, newest first
    pub async fn find_filtered(&self, filter: OrderListFilter) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM order \
                 WHERE ($status IS NONE OR orderStatus = $status) \
                 AND ($start IS NONE OR createdAt >= $start) \
                 AND ($end IS NONE OR createdAt <= $end) \
                 ORDER BY createdAt DESC \
                 LIMIT $limit",
            )
            .bind(("status", filter.status))
            .bind(("start", filter.start))
            .bind(("end", filter.end))
            .bind(("limit", filter.limit))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Load every order (sales aggregation input)
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self.base.db().select(TABLE).await?;
        Ok(orders)
    }

    /// Apply a status patch, guarded by the previously observed status
    ///
    /// Returns `None` when the guard fails, i.e. another writer changed the
    /// order status between read and write.
    pub async fn apply_status_patch(
        &self,
        id: &str,
        patch: OrderStatusPatch,
        expected: OrderStatus,
    ) -> RepoResult<Option<Order>> {
        let record_id = parse_record_id(TABLE, id);
        let mut result = self
            .base
            .db()
            .query("UPDATE $order MERGE $patch WHERE orderStatus = $expected RETURN AFTER")
            .bind(("order", record_id))
            .bind(("patch", patch))
            .bind(("expected", expected))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }
}
