//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Deserialize;

use shared::order::OrderStatus;
use shared::response::ApiResponse;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{CancelOrderRequest, CreateOrderRequest, Order, UpdateStatusRequest};
use crate::orders::{OrderListFilter, SalesStats};
use crate::utils::AppResult;

/// Query params for the admin order listing
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<OrderStatus>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    50
}

/// Parse a date filter: RFC 3339 instants pass through, bare dates become
/// local day bounds (start or end of the day).
fn parse_date_bound(value: &str, end_of_day: bool) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    let time = if end_of_day {
        NaiveTime::from_hms_milli_opt(23, 59, 59, 999)?
    } else {
        NaiveTime::MIN
    };
    Local
        .from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// POST /api/orders - checkout (public)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Order>>)> {
    let order = state.order_service().create_order(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            order,
            "Order created successfully",
        )),
    ))
}

/// GET /api/orders - admin listing, newest first
pub async fn list(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    let filter = OrderListFilter {
        status: query.status,
        start: query
            .start_date
            .as_deref()
            .and_then(|s| parse_date_bound(s, false)),
        end: query
            .end_date
            .as_deref()
            .and_then(|s| parse_date_bound(s, true)),
        limit: query.limit,
    };

    let orders = state.order_service().list(filter).await?;
    let count = orders.len();
    Ok(Json(ApiResponse::ok_with_count(orders, count)))
}

/// GET /api/orders/number/:order_number - tracking lookup (public)
pub async fn get_by_number(
    State(state): State<ServerState>,
    Path(order_number): Path<String>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = state.order_service().get_by_number(&order_number).await?;
    Ok(Json(ApiResponse::ok(order)))
}

/// PUT /api/orders/:id/status - admin status transition
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = state
        .order_service()
        .update_status(&id, payload.status, &user.name)
        .await?;

    Ok(Json(ApiResponse::ok_with_message(
        order,
        "Status updated successfully",
    )))
}

/// PUT /api/orders/:id/cancel - cancellation (public)
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CancelOrderRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = state
        .order_service()
        .cancel_order(&id, payload.reason)
        .await?;

    Ok(Json(ApiResponse::ok_with_message(
        order,
        "Order cancelled successfully",
    )))
}

/// GET /api/orders/stats/sales - admin sales statistics
pub async fn sales_stats(
    State(state): State<ServerState>,
    _user: CurrentUser,
) -> AppResult<Json<ApiResponse<SalesStats>>> {
    let stats = state.order_service().sales_stats().await?;
    Ok(Json(ApiResponse::ok(stats)))
}
