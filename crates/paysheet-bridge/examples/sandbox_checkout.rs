//! Sandbox checkout run against the scripted mock driver.
//!
//! ```bash
//! cargo run -p paysheet-bridge --example sandbox_checkout
//! ```

use paysheet_bridge::{Environment, MerchantProfile, PaymentBridge};
use paysheet_core::{
    CardNetwork, PaymentDetails, PaymentMethodData, PaymentOptions, PaymentOutcome,
};
use paysheet_mocks::{MockBehavior, MockSheet};
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::DEBUG.into())
                .from_env_lossy(),
        )
        .init();

    let sheet = Arc::new(MockSheet::new());
    let profile = MerchantProfile::new("merchant.io.enginevector.sandbox", "EngineVector Shop")
        .with_currency("USD")
        .with_default_networks(vec![
            CardNetwork::Visa,
            CardNetwork::Mastercard,
            CardNetwork::Amex,
        ])
        .with_environment(Environment::Sandbox);
    profile.validate()?;

    let bridge = PaymentBridge::new(sheet.clone(), profile);

    let method_data = vec![PaymentMethodData::new("apple-pay")];
    let details = PaymentDetails::with_total("EngineVector Shop", "18.49")
        .with_item("Espresso kit", "15.00")
        .with_item("Shipping", "3.49");
    let options = PaymentOptions::default();

    // First run: the mock authorizes by default
    let request = bridge.create_request(&method_data, &details, &options)?;
    info!(request_id = %request.request_id, "💳 presenting sandbox sheet");

    match bridge.present(request).await? {
        PaymentOutcome::Authorized(response) => info!(
            transaction_id = %response.token.transaction_identifier,
            "✅ payment authorized"
        ),
        PaymentOutcome::Cancelled => info!("🚫 user dismissed the sheet"),
    }

    // Second run: script a dismissal, same checkout
    sheet.set_behavior(MockBehavior::Cancel).await;
    let request = bridge.create_request(&method_data, &details, &options)?;
    info!(request_id = %request.request_id, "💳 presenting sandbox sheet again");

    match bridge.present(request).await? {
        PaymentOutcome::Authorized(response) => info!(
            transaction_id = %response.token.transaction_identifier,
            "✅ payment authorized"
        ),
        PaymentOutcome::Cancelled => info!("🚫 user dismissed the sheet, cart unchanged"),
    }

    let presented = sheet.presented_count().await;
    info!(presented, "sandbox run complete");

    Ok(())
}
