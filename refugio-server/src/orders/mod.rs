//! Order Lifecycle Manager
//!
//! Owns every order mutation: creation (pricing + number allocation + QR),
//! status transitions, and cancellation. Reads go through the same service
//! so handlers never touch the repository directly.

pub mod number;
pub mod pricing;
pub mod qr;
pub mod stats;

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use chrono::{Duration, Local, Utc};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::error::{ApiError, ApiResult};
use shared::order::{OrderStatus, PaymentStatus, StatusHistoryEntry};

use crate::db::models::{CreateOrderRequest, Order, OrderStatusPatch, Product};
use crate::db::repository::{OrderRepository, ProductRepository, RepoError};

pub use crate::db::repository::order::OrderListFilter;
pub use stats::SalesStats;

/// Minutes added to the creation instant for the delivery estimate
const ESTIMATED_DELIVERY_MINUTES: i64 = 45;

/// Attempts at persisting with a fresh sequence number before giving up
///
/// A retry only happens when the unique index rejects a number another
/// writer claimed first.
const CREATE_MAX_ATTEMPTS: u32 = 3;

/// Actor recorded in the status history for customer-driven changes
const CUSTOMER_ACTOR: &str = "customer";

/// Order lifecycle service
#[derive(Clone)]
pub struct OrderService {
    orders: OrderRepository,
    products: ProductRepository,
    frontend_url: String,
}

impl OrderService {
    pub fn new(db: Surreal<Db>, frontend_url: impl Into<String>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            products: ProductRepository::new(db),
            frontend_url: frontend_url.into(),
        }
    }

    /// Create an order from a checkout request
    ///
    /// Prices against the current catalog snapshot, allocates the next
    /// order number, renders the tracking QR code and persists. Retries
    /// number allocation if the unique index loses a race.
    pub async fn create_order(&self, request: CreateOrderRequest) -> ApiResult<Order> {
        if request.items.is_empty() {
            return Err(ApiError::validation("Order must have at least one item"));
        }
        if request.customer.name.trim().is_empty() {
            return Err(ApiError::validation("Customer name is required"));
        }
        if request.customer.phone.trim().is_empty() {
            return Err(ApiError::validation("Customer phone is required"));
        }

        // Catalog snapshot for the requested products
        let ids: Vec<String> = request.items.iter().map(|i| i.product.clone()).collect();
        let catalog: HashMap<String, Product> = self
            .products
            .find_by_ids(&ids)
            .await
            .map_err(ApiError::from)?
            .into_iter()
            .map(|p| (p.id_string(), p))
            .collect();

        let priced = pricing::price_order(&catalog, &request.items, request.delivery_type)?;

        let mut last_duplicate: Option<String> = None;
        for _attempt in 0..CREATE_MAX_ATTEMPTS {
            let sequence = self.orders.next_sequence().await.map_err(ApiError::from)?;
            let order_number = number::format_order_number(sequence);

            let tracking_url = qr::order_tracking_url(&self.frontend_url, &order_number);
            let qr_code = qr::render_data_url(&tracking_url)?;

            let now = Utc::now();
            let order = Order {
                id: None,
                order_number: order_number.clone(),
                customer: request.customer.clone(),
                items: priced.items.clone(),
                total: priced.total,
                delivery_fee: priced.delivery_fee,
                delivery_type: request.delivery_type,
                payment_method: request.payment_method,
                payment_status: PaymentStatus::Pending,
                order_status: OrderStatus::Pending,
                qr_code: Some(qr_code),
                estimated_delivery_time: now + Duration::minutes(ESTIMATED_DELIVERY_MINUTES),
                created_at: now,
                delivered_at: None,
                cancelled_at: None,
                cancellation_reason: None,
                notes: request.notes.clone(),
                status_history: vec![StatusHistoryEntry::new(
                    OrderStatus::Pending,
                    CUSTOMER_ACTOR,
                )],
            };

            match self.orders.create(order).await {
                Ok(created) => {
                    tracing::info!(
                        order_number = %created.order_number,
                        total = created.total,
                        "Order created"
                    );
                    return Ok(created);
                }
                Err(RepoError::Duplicate(message)) => {
                    tracing::warn!(
                        order_number = %order_number,
                        "Order number already taken, retrying with a fresh sequence"
                    );
                    last_duplicate = Some(message);
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(ApiError::internal(format!(
            "Could not allocate a unique order number after {} attempts: {}",
            CREATE_MAX_ATTEMPTS,
            last_duplicate.unwrap_or_default()
        )))
    }

    /// Transition an order to a new status
    ///
    /// Rejects anything the transition table does not allow. `deliveredAt`
    /// is stamped exactly once, on the `delivered` transition.
    pub async fn update_status(
        &self,
        id: &str,
        new_status: OrderStatus,
        actor: &str,
    ) -> ApiResult<Order> {
        let order = self
            .orders
            .find_by_id(id)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::not_found("Order"))?;

        let current = order.order_status;
        if !current.can_transition_to(new_status) {
            return Err(ApiError::invalid_state(format!(
                "Order cannot change from {} to {}",
                current, new_status
            )));
        }

        let mut status_history = order.status_history;
        status_history.push(StatusHistoryEntry::new(new_status, actor));

        let patch = OrderStatusPatch {
            order_status: new_status,
            delivered_at: (new_status == OrderStatus::Delivered).then(Utc::now),
            cancelled_at: None,
            cancellation_reason: None,
            status_history,
        };

        self.apply_patch(id, patch, current).await
    }

    /// Cancel an order
    ///
    /// Allowed from any non-terminal state; delivered and already-cancelled
    /// orders are final.
    pub async fn cancel_order(&self, id: &str, reason: Option<String>) -> ApiResult<Order> {
        let order = self
            .orders
            .find_by_id(id)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::not_found("Order"))?;

        let current = order.order_status;
        if current.is_terminal() {
            return Err(ApiError::invalid_state(format!(
                "Order in status {} can no longer be cancelled",
                current
            )));
        }

        let mut status_history = order.status_history;
        status_history.push(StatusHistoryEntry::new(OrderStatus::Cancelled, CUSTOMER_ACTOR));

        let patch = OrderStatusPatch {
            order_status: OrderStatus::Cancelled,
            delivered_at: None,
            cancelled_at: Some(Utc::now()),
            cancellation_reason: reason,
            status_history,
        };

        self.apply_patch(id, patch, current).await
    }

    /// Fetch an order by its human-readable number
    pub async fn get_by_number(&self, order_number: &str) -> ApiResult<Order> {
        self.orders
            .find_by_number(order_number)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::not_found("Order"))
    }

    /// List orders for the admin view, newest first
    pub async fn list(&self, filter: OrderListFilter) -> ApiResult<Vec<Order>> {
        self.orders.find_filtered(filter).await.map_err(ApiError::from)
    }

    /// Sales statistics at the current instant
    pub async fn sales_stats(&self) -> ApiResult<SalesStats> {
        let orders = self.orders.find_all().await.map_err(ApiError::from)?;
        Ok(stats::compute(&orders, Local::now()))
    }

    async fn apply_patch(
        &self,
        id: &str,
        patch: OrderStatusPatch,
        expected: OrderStatus,
    ) -> ApiResult<Order> {
        let new_status = patch.order_status;
        let updated = self
            .orders
            .apply_status_patch(id, patch, expected)
            .await
            .map_err(ApiError::from)?;

        match updated {
            Some(order) => {
                tracing::info!(
                    order_number = %order.order_number,
                    from = %expected,
                    to = %new_status,
                    "Order status updated"
                );
                Ok(order)
            }
            // The guard failed: another writer moved the order first
            None => Err(ApiError::invalid_state(
                "Order status changed concurrently, reload and retry",
            )),
        }
    }
}
