//! Sales Aggregator
//!
//! Derives today/month/total statistics from the persisted orders. Pure and
//! read-only: callers load the orders and hand in the reference instant.
//! Cancelled orders are excluded from every aggregate (fixed business rule).

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::prelude::*;
use serde::Serialize;

use shared::order::OrderStatus;

use crate::db::models::Order;

/// Count and revenue for one time window
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SalesBucket {
    pub orders: usize,
    pub revenue: f64,
}

/// All-time totals (count only, matching the admin dashboard)
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OrderTotals {
    pub orders: usize,
}

/// Orders per status
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: usize,
}

/// Full sales statistics payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesStats {
    pub today: SalesBucket,
    pub month: SalesBucket,
    pub total: OrderTotals,
    pub by_status: Vec<StatusCount>,
}

/// Start of the given local date, in UTC
fn day_start_utc(date: NaiveDate, fallback: DateTime<Local>) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| fallback.with_timezone(&Utc))
}

/// Compute sales statistics over the given orders at the reference instant
pub fn compute(orders: &[Order], now: DateTime<Local>) -> SalesStats {
    let today = now.date_naive();
    let today_start = day_start_utc(today, now);
    let month_start = day_start_utc(today.with_day(1).unwrap_or(today), now);

    let mut today_bucket = (0usize, Decimal::ZERO);
    let mut month_bucket = (0usize, Decimal::ZERO);
    let mut total_orders = 0usize;
    let mut status_counts = [0usize; OrderStatus::SEQUENCE.len()];

    for order in orders {
        if order.order_status == OrderStatus::Cancelled {
            continue;
        }

        total_orders += 1;
        if let Some(idx) = OrderStatus::SEQUENCE
            .iter()
            .position(|s| *s == order.order_status)
        {
            status_counts[idx] += 1;
        }

        let revenue = Decimal::from_f64(order.total).unwrap_or_default();
        if order.created_at >= month_start {
            month_bucket.0 += 1;
            month_bucket.1 += revenue;
        }
        if order.created_at >= today_start {
            today_bucket.0 += 1;
            today_bucket.1 += revenue;
        }
    }

    let by_status = OrderStatus::SEQUENCE
        .iter()
        .zip(status_counts)
        .filter(|(_, count)| *count > 0)
        .map(|(status, count)| StatusCount {
            status: *status,
            count,
        })
        .collect();

    SalesStats {
        today: SalesBucket {
            orders: today_bucket.0,
            revenue: today_bucket.1.to_f64().unwrap_or_default(),
        },
        month: SalesBucket {
            orders: month_bucket.0,
            revenue: month_bucket.1.to_f64().unwrap_or_default(),
        },
        total: OrderTotals {
            orders: total_orders,
        },
        by_status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::{Customer, DeliveryType, PaymentMethod, PaymentStatus};

    fn order_at(status: OrderStatus, total: f64, created_at: DateTime<Local>) -> Order {
        Order {
            id: None,
            order_number: "RFL000001".to_string(),
            customer: Customer {
                name: "Maria".to_string(),
                email: None,
                phone: "11 99999-0000".to_string(),
                address: None,
            },
            items: Vec::new(),
            total,
            delivery_fee: 5.0,
            delivery_type: DeliveryType::Delivery,
            payment_method: PaymentMethod::Pix,
            payment_status: PaymentStatus::Pending,
            order_status: status,
            qr_code: None,
            estimated_delivery_time: created_at.with_timezone(&Utc),
            created_at: created_at.with_timezone(&Utc),
            delivered_at: None,
            cancelled_at: None,
            cancellation_reason: None,
            notes: None,
            status_history: Vec::new(),
        }
    }

    fn local(y: i32, m: u32, d: u32, h: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(y, m, d, h, 0, 0)
            .single()
            .expect("valid test datetime")
    }

    #[test]
    fn empty_order_set_yields_zeros() {
        let stats = compute(&[], local(2026, 6, 15, 12));

        assert_eq!(stats.today, SalesBucket { orders: 0, revenue: 0.0 });
        assert_eq!(stats.month, SalesBucket { orders: 0, revenue: 0.0 });
        assert_eq!(stats.total.orders, 0);
        assert!(stats.by_status.is_empty());
    }

    #[test]
    fn cancelled_orders_are_excluded_everywhere() {
        let now = local(2026, 6, 15, 12);
        let orders = vec![
            order_at(OrderStatus::Delivered, 20.0, local(2026, 6, 15, 9)),
            order_at(OrderStatus::Cancelled, 999.0, local(2026, 6, 15, 10)),
        ];

        let stats = compute(&orders, now);
        assert_eq!(stats.total.orders, 1);
        assert_eq!(stats.today, SalesBucket { orders: 1, revenue: 20.0 });
        assert_eq!(stats.month, SalesBucket { orders: 1, revenue: 20.0 });
        assert!(stats.by_status.iter().all(|s| s.status != OrderStatus::Cancelled));
    }

    #[test]
    fn buckets_split_on_local_midnight_and_month_start() {
        let now = local(2026, 6, 15, 12);
        let orders = vec![
            // today
            order_at(OrderStatus::Pending, 30.0, local(2026, 6, 15, 0)),
            // this month, before today
            order_at(OrderStatus::Delivered, 50.0, local(2026, 6, 3, 18)),
            // previous month
            order_at(OrderStatus::Delivered, 70.0, local(2026, 5, 20, 18)),
        ];

        let stats = compute(&orders, now);
        assert_eq!(stats.today, SalesBucket { orders: 1, revenue: 30.0 });
        assert_eq!(stats.month, SalesBucket { orders: 2, revenue: 80.0 });
        assert_eq!(stats.total.orders, 3);
    }

    #[test]
    fn by_status_groups_non_cancelled_orders() {
        let now = local(2026, 6, 15, 12);
        let orders = vec![
            order_at(OrderStatus::Pending, 10.0, local(2026, 6, 15, 8)),
            order_at(OrderStatus::Pending, 10.0, local(2026, 6, 15, 9)),
            order_at(OrderStatus::Preparing, 10.0, local(2026, 6, 15, 10)),
            order_at(OrderStatus::Cancelled, 10.0, local(2026, 6, 15, 11)),
        ];

        let stats = compute(&orders, now);
        assert_eq!(
            stats.by_status,
            vec![
                StatusCount { status: OrderStatus::Pending, count: 2 },
                StatusCount { status: OrderStatus::Preparing, count: 1 },
            ]
        );
    }

    #[test]
    fn revenue_sums_exactly_despite_float_totals() {
        let now = local(2026, 6, 15, 12);
        let orders = vec![
            order_at(OrderStatus::Delivered, 18.90, local(2026, 6, 15, 8)),
            order_at(OrderStatus::Delivered, 23.90, local(2026, 6, 15, 9)),
            order_at(OrderStatus::Delivered, 0.30, local(2026, 6, 15, 10)),
        ];

        let stats = compute(&orders, now);
        assert_eq!(stats.today.revenue, 43.10);
    }
}
