//! Order Pricing Engine
//!
//! Pure pricing over an immutable catalog snapshot: no storage access, no
//! side effects. All arithmetic runs on `Decimal` and is rounded to 2 dp
//! (half-up) before crossing back to `f64` for storage/serialization.

use std::collections::HashMap;

use rust_decimal::prelude::*;
use thiserror::Error;

use shared::error::ApiError;
use shared::order::DeliveryType;

use crate::db::models::{OrderItem, OrderItemRequest, Product};

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Fixed surcharge for delivery orders; a policy constant, never user input
pub const DELIVERY_FEE: Decimal = Decimal::from_parts(500, 0, 0, false, 2);

/// Pricing failure modes
#[derive(Debug, Error)]
pub enum PricingError {
    #[error("Product {product} not found")]
    NotFound { product: String },

    #[error("Product {name} is not available")]
    Unavailable { name: String },

    #[error("Quantity for {product} must be a positive integer, got {quantity}")]
    InvalidQuantity { product: String, quantity: i32 },

    #[error("Product {name} has an invalid price")]
    InvalidPrice { name: String },
}

impl From<PricingError> for ApiError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::NotFound { product } => {
                ApiError::not_found(format!("Product {}", product))
            }
            PricingError::Unavailable { name } => ApiError::unavailable(name),
            PricingError::InvalidQuantity { .. } => ApiError::validation(err.to_string()),
            PricingError::InvalidPrice { .. } => ApiError::internal(err.to_string()),
        }
    }
}

/// Priced order lines plus the derived totals
#[derive(Debug, Clone)]
pub struct PricedOrder {
    pub items: Vec<OrderItem>,
    pub items_total: f64,
    pub delivery_fee: f64,
    pub total: f64,
}

/// Delivery fee owed for the given delivery type
pub fn delivery_fee_for(delivery_type: DeliveryType) -> Decimal {
    match delivery_type {
        DeliveryType::Delivery => DELIVERY_FEE,
        DeliveryType::Pickup | DeliveryType::DineIn => Decimal::ZERO,
    }
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// Price the requested items against the catalog snapshot
///
/// Product name and price are copied into the resulting lines, decoupling
/// the order from future catalog edits. The grand total is
/// `sum(subtotals) + delivery fee`.
pub fn price_order(
    catalog: &HashMap<String, Product>,
    requested: &[OrderItemRequest],
    delivery_type: DeliveryType,
) -> Result<PricedOrder, PricingError> {
    let mut items = Vec::with_capacity(requested.len());
    let mut items_total = Decimal::ZERO;

    for request in requested {
        let product = catalog
            .get(&request.product)
            .ok_or_else(|| PricingError::NotFound {
                product: request.product.clone(),
            })?;

        if !product.available {
            return Err(PricingError::Unavailable {
                name: product.name.clone(),
            });
        }

        if request.quantity <= 0 {
            return Err(PricingError::InvalidQuantity {
                product: product.name.clone(),
                quantity: request.quantity,
            });
        }

        let price = Decimal::from_f64(product.price)
            .filter(|p| !p.is_sign_negative())
            .ok_or_else(|| PricingError::InvalidPrice {
                name: product.name.clone(),
            })?;

        let subtotal = round_money(price * Decimal::from(request.quantity));
        items_total += subtotal;

        items.push(OrderItem {
            product: product.id_string(),
            name: product.name.clone(),
            price: to_f64(round_money(price)),
            quantity: request.quantity,
            subtotal: to_f64(subtotal),
        });
    }

    let delivery_fee = delivery_fee_for(delivery_type);
    let total = round_money(items_total + delivery_fee);

    Ok(PricedOrder {
        items,
        items_total: to_f64(round_money(items_total)),
        delivery_fee: to_f64(delivery_fee),
        total: to_f64(total),
    })
}
