use chrono::Duration;

use shared::error::ApiError;
use shared::order::{Customer, DeliveryType, OrderStatus, PaymentMethod, PaymentStatus};

use crate::db::DbService;
use crate::db::models::{CreateOrderRequest, OrderItemRequest, ProductCategory, ProductCreate};
use crate::db::repository::ProductRepository;

use super::*;

async fn create_test_service() -> (OrderService, ProductRepository) {
    let db = DbService::new_in_memory().await.unwrap().db;
    let service = OrderService::new(db.clone(), "http://localhost:3000");
    (service, ProductRepository::new(db))
}

async fn seed_product(
    products: &ProductRepository,
    name: &str,
    price: f64,
    available: bool,
) -> String {
    let product = products
        .create(ProductCreate {
            name: name.to_string(),
            description: format!("{} de teste", name),
            price,
            category: ProductCategory::Lanches,
            image: "/images/produtos/teste.jpg".to_string(),
            available: Some(available),
            preparation_time: None,
        })
        .await
        .unwrap();
    product.id_string()
}

fn checkout(product_id: &str, quantity: i32, delivery_type: DeliveryType) -> CreateOrderRequest {
    CreateOrderRequest {
        customer: Customer {
            name: "Maria Silva".to_string(),
            email: Some("maria@example.com".to_string()),
            phone: "11 99999-0000".to_string(),
            address: None,
        },
        items: vec![OrderItemRequest {
            product: product_id.to_string(),
            quantity,
        }],
        payment_method: PaymentMethod::Pix,
        delivery_type,
        notes: None,
    }
}

// ========================================================================
// Creation
// ========================================================================

#[tokio::test]
async fn create_order_prices_items_and_assigns_number() {
    let (service, products) = create_test_service().await;
    let product_id = seed_product(&products, "X-Burguer", 18.90, true).await;

    let order = service
        .create_order(checkout(&product_id, 2, DeliveryType::Delivery))
        .await
        .unwrap();

    assert_eq!(order.order_number, "RFL000001");
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].subtotal, 37.80);
    assert_eq!(order.delivery_fee, 5.00);
    assert_eq!(order.total, 42.80);
    assert_eq!(order.order_status, OrderStatus::Pending);
    assert_eq!(order.payment_status, PaymentStatus::Pending);
    assert_eq!(
        order.estimated_delivery_time - order.created_at,
        Duration::minutes(45)
    );
    assert!(order.qr_code.as_deref().unwrap().starts_with("data:image/svg+xml"));
    assert_eq!(order.status_history.len(), 1);
    assert_eq!(order.status_history[0].status, OrderStatus::Pending);
}

#[tokio::test]
async fn sequential_orders_get_distinct_numbers() {
    let (service, products) = create_test_service().await;
    let product_id = seed_product(&products, "X-Frango", 17.90, true).await;

    let mut numbers = Vec::new();
    for _ in 0..3 {
        let order = service
            .create_order(checkout(&product_id, 1, DeliveryType::Pickup))
            .await
            .unwrap();
        numbers.push(order.order_number);
    }

    assert_eq!(numbers, vec!["RFL000001", "RFL000002", "RFL000003"]);
}

#[tokio::test]
async fn empty_item_list_is_rejected() {
    let (service, _products) = create_test_service().await;

    let mut request = checkout("product:whatever", 1, DeliveryType::Delivery);
    request.items.clear();

    let err = service.create_order(request).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation { .. }));
}

#[tokio::test]
async fn unknown_product_is_rejected() {
    let (service, _products) = create_test_service().await;

    let err = service
        .create_order(checkout("product:ghost", 1, DeliveryType::Delivery))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
}

#[tokio::test]
async fn unavailable_product_is_rejected() {
    let (service, products) = create_test_service().await;
    let product_id = seed_product(&products, "Açaí 500ml", 15.00, false).await;

    let err = service
        .create_order(checkout(&product_id, 1, DeliveryType::Delivery))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Unavailable { .. }));
}

#[tokio::test]
async fn price_snapshot_survives_catalog_edits() {
    let (service, products) = create_test_service().await;
    let product_id = seed_product(&products, "X-Tudo", 24.90, true).await;

    let order = service
        .create_order(checkout(&product_id, 1, DeliveryType::Pickup))
        .await
        .unwrap();

    // Raise the catalog price after the sale
    products
        .update(
            &product_id,
            crate::db::models::ProductUpdate {
                name: None,
                description: None,
                price: Some(29.90),
                category: None,
                image: None,
                available: None,
                preparation_time: None,
            },
        )
        .await
        .unwrap();

    let reloaded = service.get_by_number(&order.order_number).await.unwrap();
    assert_eq!(reloaded.items[0].price, 24.90);
    assert_eq!(reloaded.total, 24.90);
}

// ========================================================================
// Status transitions
// ========================================================================

#[tokio::test]
async fn delivered_at_is_stamped_only_on_the_delivered_transition() {
    let (service, products) = create_test_service().await;
    let product_id = seed_product(&products, "X-Bacon", 21.90, true).await;

    let order = service
        .create_order(checkout(&product_id, 1, DeliveryType::Delivery))
        .await
        .unwrap();
    let id = order.id_string();

    let order = service
        .update_status(&id, OrderStatus::Confirmed, "Administrador")
        .await
        .unwrap();
    assert_eq!(order.order_status, OrderStatus::Confirmed);
    assert!(order.delivered_at.is_none());

    let order = service
        .update_status(&id, OrderStatus::Delivered, "Administrador")
        .await
        .unwrap();
    assert_eq!(order.order_status, OrderStatus::Delivered);
    assert!(order.delivered_at.is_some());

    // pending -> confirmed -> delivered, each appended to the trail
    assert_eq!(order.status_history.len(), 3);
    assert_eq!(order.status_history[2].status, OrderStatus::Delivered);
    assert_eq!(order.status_history[2].actor, "Administrador");
}

#[tokio::test]
async fn backward_transition_is_rejected() {
    let (service, products) = create_test_service().await;
    let product_id = seed_product(&products, "Batata Frita", 12.50, true).await;

    let order = service
        .create_order(checkout(&product_id, 1, DeliveryType::Pickup))
        .await
        .unwrap();
    let id = order.id_string();

    service
        .update_status(&id, OrderStatus::Preparing, "Administrador")
        .await
        .unwrap();

    let err = service
        .update_status(&id, OrderStatus::Pending, "Administrador")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidState { .. }));
}

#[tokio::test]
async fn updating_a_missing_order_is_not_found() {
    let (service, _products) = create_test_service().await;

    let err = service
        .update_status("order:missing", OrderStatus::Confirmed, "Administrador")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
}

// ========================================================================
// Cancellation
// ========================================================================

#[tokio::test]
async fn cancelling_an_active_order_stamps_reason_and_time() {
    let (service, products) = create_test_service().await;
    let product_id = seed_product(&products, "Milkshake", 14.00, true).await;

    let order = service
        .create_order(checkout(&product_id, 1, DeliveryType::Delivery))
        .await
        .unwrap();

    let cancelled = service
        .cancel_order(&order.id_string(), Some("Cliente desistiu".to_string()))
        .await
        .unwrap();

    assert_eq!(cancelled.order_status, OrderStatus::Cancelled);
    assert!(cancelled.cancelled_at.is_some());
    assert_eq!(cancelled.cancellation_reason.as_deref(), Some("Cliente desistiu"));
}

#[tokio::test]
async fn terminal_orders_cannot_be_cancelled() {
    let (service, products) = create_test_service().await;
    let product_id = seed_product(&products, "Suco de Laranja", 8.00, true).await;

    // Delivered order
    let order = service
        .create_order(checkout(&product_id, 1, DeliveryType::Delivery))
        .await
        .unwrap();
    let id = order.id_string();
    service
        .update_status(&id, OrderStatus::Delivered, "Administrador")
        .await
        .unwrap();
    let err = service.cancel_order(&id, None).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidState { .. }));

    // Already-cancelled order
    let order = service
        .create_order(checkout(&product_id, 1, DeliveryType::Delivery))
        .await
        .unwrap();
    let id = order.id_string();
    service.cancel_order(&id, None).await.unwrap();
    let err = service.cancel_order(&id, None).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidState { .. }));
}

// ========================================================================
// Lookup and listing
// ========================================================================

#[tokio::test]
async fn get_by_number_resolves_or_404s() {
    let (service, products) = create_test_service().await;
    let product_id = seed_product(&products, "Pudim", 9.00, true).await;

    let order = service
        .create_order(checkout(&product_id, 1, DeliveryType::Pickup))
        .await
        .unwrap();

    let found = service.get_by_number(&order.order_number).await.unwrap();
    assert_eq!(found.id_string(), order.id_string());

    let err = service.get_by_number("RFL999999").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
}

#[tokio::test]
async fn list_filters_by_status_and_honors_limit() {
    let (service, products) = create_test_service().await;
    let product_id = seed_product(&products, "Guaraná Lata", 6.00, true).await;

    for _ in 0..3 {
        service
            .create_order(checkout(&product_id, 1, DeliveryType::Pickup))
            .await
            .unwrap();
    }
    let confirmed = service
        .create_order(checkout(&product_id, 1, DeliveryType::Pickup))
        .await
        .unwrap();
    service
        .update_status(&confirmed.id_string(), OrderStatus::Confirmed, "Administrador")
        .await
        .unwrap();

    let pending = service
        .list(OrderListFilter {
            status: Some(OrderStatus::Pending),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(pending.len(), 3);

    let limited = service
        .list(OrderListFilter {
            limit: 2,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(limited.len(), 2);
}

// ========================================================================
// Aggregation over the lifecycle
// ========================================================================

#[tokio::test]
async fn sales_stats_follow_the_lifecycle() {
    let (service, products) = create_test_service().await;
    let product_id = seed_product(&products, "X-Burguer", 18.90, true).await;

    let kept = service
        .create_order(checkout(&product_id, 2, DeliveryType::Delivery))
        .await
        .unwrap();
    let dropped = service
        .create_order(checkout(&product_id, 10, DeliveryType::Delivery))
        .await
        .unwrap();
    service
        .cancel_order(&dropped.id_string(), Some("Pedido duplicado".to_string()))
        .await
        .unwrap();

    let stats = service.sales_stats().await.unwrap();
    assert_eq!(stats.total.orders, 1);
    assert_eq!(stats.today.orders, 1);
    assert_eq!(stats.today.revenue, kept.total);
    assert_eq!(stats.by_status.len(), 1);
    assert_eq!(stats.by_status[0].status, OrderStatus::Pending);
}
