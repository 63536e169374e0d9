//! Preflight check for the storefront payment adapter.
//!
//! Loads and validates configuration, then builds the gateway adapter the
//! same way the host does. Given a transaction id, queries its status.
//!
//! ```text
//! storefront-payments [TRANSACTION_ID]
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use storefront_payments::adapters::HttpGatewayTransport;
use storefront_payments::application::PaymentSessionService;
use storefront_payments::config::AppConfig;
use storefront_payments::domain::payment::{TransactionId, PROVIDER_ID};
use storefront_payments::telemetry;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("preflight failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    config.validate()?;
    telemetry::init_tracing(&config.telemetry)?;

    let transport = Arc::new(HttpGatewayTransport::new(config.gateway.api_base_url.as_str()));
    let service = PaymentSessionService::from_config(&config.gateway, transport)?;

    tracing::info!(
        provider = PROVIDER_ID,
        environment = ?config.environment,
        gateway = %config.gateway.api_base_url,
        "Payment adapter ready"
    );

    if let Some(raw_id) = std::env::args().nth(1) {
        let transaction_id = TransactionId::new(raw_id)?;
        let status = service.query_status(&transaction_id).await?;
        println!("{} {}", transaction_id, status);
    }

    Ok(())
}
