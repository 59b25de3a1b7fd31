//! Shared types for the Refugio's Lanche ordering platform
//!
//! Common vocabulary used across crates: the order-domain types and
//! state machine, the unified error type, and the API response envelope.

pub mod error;
pub mod order;
pub mod response;

// Re-exports
pub use error::{ApiError, ApiResult};
pub use order::{
    Address, Customer, DeliveryType, OrderStatus, PaymentMethod, PaymentStatus,
    StatusHistoryEntry,
};
pub use response::ApiResponse;
