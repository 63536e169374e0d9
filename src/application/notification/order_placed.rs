//! OrderPlacedNotifier - sends the order confirmation with download links.
//!
//! Listens for `order.placed`. For every line item it looks up the downloadable
//! media of the item's variant and asks file storage for a private presigned
//! URL per file. The confirmation goes out only when at least one link exists.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::try_join_all;
use serde_json::{json, Value as JsonValue};

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::domain::notification::{EmailTemplates, Order, OrderPlaced, TemplatedEmail};
use crate::ports::{EmailSender, EventHandler, FileUrlSigner, OrderReader, ProductMediaReader};

/// Handles `order.placed` events.
pub struct OrderPlacedNotifier {
    order_reader: Arc<dyn OrderReader>,
    media_reader: Arc<dyn ProductMediaReader>,
    url_signer: Arc<dyn FileUrlSigner>,
    email_sender: Arc<dyn EmailSender>,
    templates: EmailTemplates,
}

impl OrderPlacedNotifier {
    pub fn new(
        order_reader: Arc<dyn OrderReader>,
        media_reader: Arc<dyn ProductMediaReader>,
        url_signer: Arc<dyn FileUrlSigner>,
        email_sender: Arc<dyn EmailSender>,
        templates: EmailTemplates,
    ) -> Self {
        Self {
            order_reader,
            media_reader,
            url_signer,
            email_sender,
            templates,
        }
    }

    /// Presigned URLs for all media of all items, in item order.
    async fn download_urls(&self, order: &Order) -> Result<Vec<String>, DomainError> {
        let mut urls = Vec::new();
        for item in &order.items {
            let Some(variant_id) = item.variant_id.as_deref() else {
                continue;
            };
            let media = self.media_reader.list_by_variant(variant_id).await?;
            let item_urls = try_join_all(
                media
                    .iter()
                    .map(|m| self.url_signer.presigned_download_url(&m.file_key, true)),
            )
            .await?;
            urls.extend(item_urls);
        }
        Ok(urls)
    }

    fn template_data(order: &Order, urls: Vec<String>) -> JsonValue {
        let items: Vec<JsonValue> = order
            .items
            .iter()
            .map(|item| {
                json!({
                    "quantity": item.quantity,
                    "price": item.display_price(),
                })
            })
            .collect();

        json!({
            "customer": { "first_name": order.customer.first_name },
            "items": items,
            "total": order.total,
            "billing_address": order.billing_address,
            "downloadUrl": urls,
        })
    }
}

#[async_trait]
impl EventHandler for OrderPlacedNotifier {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let payload: OrderPlaced = event.payload_as()?;
        tracing::info!(order_id = %payload.id, "Handling order placed");

        let order = self
            .order_reader
            .get_order(&payload.id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::OrderNotFound,
                    format!("Order not found: {}", payload.id),
                )
            })?;

        let urls = self.download_urls(&order).await?;
        if urls.is_empty() {
            tracing::info!(order_id = %order.id, "No download URLs, not sending email");
            return Ok(());
        }

        let url_count = urls.len();
        let email = TemplatedEmail::new(
            self.templates.order_placed.as_str(),
            self.templates.from.as_str(),
            order.customer.email.as_str(),
            Self::template_data(&order, urls),
        )?;

        match self.email_sender.send(email).await {
            Ok(()) => {
                tracing::info!(order_id = %order.id, url_count, "Order confirmation sent")
            }
            Err(e) => tracing::warn!(
                order_id = %order.id,
                event_type = %event.event_type,
                error = %e,
                "Order confirmation email failed"
            ),
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "OrderPlacedNotifier"
    }
}
