//! # Unsupported Platform Driver
//!
//! The driver for builds without a native payment framework. Reports the
//! platform as unavailable and refuses every presentation, so callers hit
//! the same `PlatformUnavailable` path they would on unsupported devices.

use async_trait::async_trait;
use paysheet_core::{PlatformRequest, PlatformSheet, SheetDelegate, SheetError, SheetResult};
use tracing::warn;

/// Platform driver for targets with no payment sheet
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedSheet;

impl UnsupportedSheet {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PlatformSheet for UnsupportedSheet {
    async fn can_make_payments(&self) -> bool {
        false
    }

    async fn present(
        &self,
        request: &PlatformRequest,
        _delegate: SheetDelegate,
    ) -> SheetResult<()> {
        warn!(
            request_id = %request.request_id,
            "payment sheet requested on a platform without one"
        );
        Err(SheetError::PlatformUnavailable)
    }

    async fn open_payment_setup(&self) -> SheetResult<()> {
        warn!("payment setup requested on a platform without one");
        Err(SheetError::PlatformUnavailable)
    }

    fn platform_name(&self) -> &'static str {
        "unsupported"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paysheet_core::{CardNetwork, ShippingType};

    fn empty_request() -> PlatformRequest {
        PlatformRequest {
            request_id: "req-none".to_string(),
            merchant_identifier: "merchant.test".to_string(),
            country_code: "US".to_string(),
            currency_code: "USD".to_string(),
            supported_networks: vec![CardNetwork::Visa],
            merchant_capabilities: vec![],
            summary_items: vec![],
            required_contact_fields: vec![],
            shipping_type: ShippingType::Shipping,
        }
    }

    #[tokio::test]
    async fn test_reports_payments_unavailable() {
        let sheet = UnsupportedSheet::new();
        assert!(!sheet.can_make_payments().await);
        assert!(
            !sheet
                .can_make_payments_using_networks(&[CardNetwork::Visa])
                .await
        );
    }

    #[tokio::test]
    async fn test_refuses_presentation() {
        let sheet = UnsupportedSheet::new();
        let (delegate, _settled) = SheetDelegate::channel("req-none".to_string());
        let err = sheet.present(&empty_request(), delegate).await.unwrap_err();
        assert!(matches!(err, SheetError::PlatformUnavailable));
    }

    #[tokio::test]
    async fn test_setup_flow_unavailable() {
        let sheet = UnsupportedSheet::new();
        assert!(matches!(
            sheet.open_payment_setup().await,
            Err(SheetError::PlatformUnavailable)
        ));
    }
}
