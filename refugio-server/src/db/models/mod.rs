//! Database Models

// Serde helpers
pub mod serde_helpers;

// Auth
pub mod admin;

// Catalog
pub mod product;

// Orders
pub mod order;

// Re-exports
pub use admin::{Admin, AdminCreate, AdminInfo, AdminRole};
pub use order::{
    CancelOrderRequest, CreateOrderRequest, Order, OrderItem, OrderItemRequest, OrderStatusPatch,
    UpdateStatusRequest,
};
pub use product::{Product, ProductCategory, ProductCreate, ProductUpdate};
