//! Order Model
//!
//! Orders embed name/price snapshots taken at creation time, so later
//! catalog edits never alter historical orders. Orders are never deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use shared::order::{
    Customer, DeliveryType, OrderStatus, PaymentMethod, PaymentStatus, StatusHistoryEntry,
};

use super::serde_helpers;

/// One order line with its price snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product reference (`"product:id"` string)
    pub product: String,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    pub subtotal: f64,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// Human-readable sequential number, immutable once set
    pub order_number: String,
    pub customer: Customer,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub delivery_fee: f64,
    pub delivery_type: DeliveryType,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    /// QR code (data URL) pointing at the public tracking page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
    pub estimated_delivery_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Append-only audit trail of status changes
    #[serde(default)]
    pub status_history: Vec<StatusHistoryEntry>,
}

impl Order {
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|id| id.to_string()).unwrap_or_default()
    }
}

// =============================================================================
// API Request Types
// =============================================================================

/// One requested line at checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemRequest {
    /// Product reference (`"product:id"` string)
    pub product: String,
    pub quantity: i32,
}

/// Checkout payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer: Customer,
    pub items: Vec<OrderItemRequest>,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub delivery_type: DeliveryType,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Status update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// Cancellation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelOrderRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

// =============================================================================
// Persistence Patch Types
// =============================================================================

/// Fields touched by a status transition, merged into the stored order
///
/// Applied with a compare-and-swap on the previously observed status, so
/// concurrent transitions on the same order cannot interleave.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusPatch {
    pub order_status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    pub status_history: Vec<StatusHistoryEntry>,
}
