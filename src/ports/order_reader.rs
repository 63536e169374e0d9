//! Read ports onto the host's order and product-media data.
//!
//! The host platform owns orders and media; the notification handlers only
//! query them.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::notification::{Order, ProductMedia};

/// Reader port for orders.
#[async_trait]
pub trait OrderReader: Send + Sync {
    /// Get an order with items, variants and customer loaded.
    ///
    /// Returns `None` if no order has this id.
    async fn get_order(&self, order_id: &str) -> Result<Option<Order>, DomainError>;
}

/// Reader port for downloadable product media.
#[async_trait]
pub trait ProductMediaReader: Send + Sync {
    /// List media attached to a product variant. Empty when there is none.
    async fn list_by_variant(&self, variant_id: &str) -> Result<Vec<ProductMedia>, DomainError>;
}
