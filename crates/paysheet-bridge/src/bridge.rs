//! # Payment Bridge
//!
//! The bridge over the platform payment framework: builds the native
//! request from caller input, presents the modal sheet through a
//! `PlatformSheet` driver, and settles the caller's future exactly once
//! with the terminal result.

use crate::convert;
use crate::profile::MerchantProfile;
use crate::session::{PendingAuthorization, SessionSlot};
use chrono::Utc;
use paysheet_core::{
    BoxedPlatformSheet, CardNetwork, PaymentDetails, PaymentMethodData, PaymentOptions,
    PaymentOutcome, PaymentResponse, PaymentToken, PlatformAuthorization, PlatformRequest,
    SheetDelegate, SheetError, SheetEvent, SheetResult,
};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Method identifiers this bridge recognizes in method data
pub const SUPPORTED_METHOD_IDS: &[&str] = &["apple-pay", "https://apple.com/apple-pay"];

/// Bridge between the application and the platform payment sheet.
///
/// Holds the merchant profile, the platform driver, and the single
/// presentation slot. Clones share the slot, so the one-sheet-at-a-time
/// rule holds across clones.
#[derive(Clone)]
pub struct PaymentBridge {
    driver: BoxedPlatformSheet,
    profile: MerchantProfile,
    slot: SessionSlot,
}

impl PaymentBridge {
    /// Create a bridge over the given platform driver
    pub fn new(driver: BoxedPlatformSheet, profile: MerchantProfile) -> Self {
        Self {
            driver,
            profile,
            slot: SessionSlot::new(),
        }
    }

    /// The merchant profile this bridge presents for
    pub fn profile(&self) -> &MerchantProfile {
        &self.profile
    }

    /// Whether a sheet presentation is currently in flight
    pub fn is_presenting(&self) -> bool {
        self.slot.is_presenting()
    }

    /// The presentation currently in flight, if any
    pub fn current_session(&self) -> Option<PendingAuthorization> {
        self.slot.current()
    }

    /// Build the platform-native request from caller input. No side effects.
    ///
    /// Validates everything up front: the method-data list must contain a
    /// recognized entry, the total must be present and non-negative, and
    /// every amount must parse. Merchant identifier, country and currency
    /// fall back to the profile when the method data omits them; so do the
    /// supported networks when the caller declares none.
    #[instrument(
        skip(self, method_data, details, options),
        fields(merchant = %self.profile.display_name)
    )]
    pub fn create_request(
        &self,
        method_data: &[PaymentMethodData],
        details: &PaymentDetails,
        options: &PaymentOptions,
    ) -> SheetResult<PlatformRequest> {
        let method = self.select_method_entry(method_data)?;

        let total = details.total.as_ref().ok_or_else(|| {
            SheetError::InvalidDetails("payment details carry no total".to_string())
        })?;
        if let Ok(amount) = Decimal::from_str(&total.amount) {
            if amount < Decimal::ZERO {
                return Err(SheetError::InvalidDetails(format!(
                    "total amount {} is negative",
                    total.amount
                )));
            }
        }

        // A malformed total surfaces here as InvalidAmount with its label
        let summary_items = convert::summary_items(details)?;

        let mut supported_networks = convert::supported_networks(method);
        if supported_networks.is_empty() {
            supported_networks = self.profile.default_networks.clone();
        }

        let request = PlatformRequest {
            request_id: details
                .id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            merchant_identifier: method
                .data
                .merchant_identifier
                .clone()
                .unwrap_or_else(|| self.profile.effective_merchant_identifier().to_string()),
            country_code: method
                .data
                .country_code
                .clone()
                .unwrap_or_else(|| self.profile.country_code.clone()),
            currency_code: method
                .data
                .currency_code
                .clone()
                .unwrap_or_else(|| self.profile.currency_code.clone()),
            supported_networks,
            merchant_capabilities: convert::merchant_capabilities(method),
            summary_items,
            required_contact_fields: convert::required_contact_fields(options),
            shipping_type: options.shipping_type,
        };

        debug!(
            request_id = %request.request_id,
            items = request.summary_items.len(),
            networks = request.supported_networks.len(),
            "built platform request"
        );

        Ok(request)
    }

    /// Present the platform payment sheet and await its terminal result.
    ///
    /// Exactly one presentation may be in flight; a second call fails with
    /// `AlreadyPresenting` and leaves the first untouched. The returned
    /// future settles exactly once: `Authorized` with the extracted token,
    /// `Cancelled` when the user dismisses the sheet, or an error when the
    /// platform cannot present or fails mid-flight. Failures are not
    /// retried here; payment UI retries are the caller's explicit call.
    #[instrument(
        skip(self, request),
        fields(request_id = %request.request_id, platform = self.driver.platform_name())
    )]
    pub async fn present(&self, request: PlatformRequest) -> SheetResult<PaymentOutcome> {
        if !self.driver.can_make_payments().await {
            warn!("platform cannot take payments on this device");
            return Err(SheetError::PlatformUnavailable);
        }

        // Slot is freed when this guard drops, on every exit path.
        let guard = self.slot.begin(&request.request_id)?;
        let (delegate, settled) = SheetDelegate::channel(request.request_id.clone());

        info!(
            session_id = %guard.pending().session_id,
            "presenting payment sheet"
        );

        if let Err(e) = self.driver.present(&request, delegate).await {
            error!(code = e.code(), "platform refused to present the sheet");
            return Err(e);
        }

        let event = settled.await.map_err(|_| SheetError::PresentationFailed {
            message: "platform dropped the sheet without reporting a result".to_string(),
        })?;

        match event {
            SheetEvent::Authorized(authorization) => {
                let response = Self::handle_user_accept(guard.pending(), authorization)?;
                Ok(PaymentOutcome::Authorized(response))
            }
            SheetEvent::Cancelled => {
                info!(session_id = %guard.pending().session_id, "user dismissed the sheet");
                Ok(PaymentOutcome::Cancelled)
            }
            SheetEvent::Failed(e) => {
                error!(code = e.code(), "platform reported a presentation failure");
                Err(e)
            }
        }
    }

    /// Turn the platform's acceptance callback into the caller's response.
    ///
    /// Runs exactly once per presentation. A missing or null token payload
    /// is the platform's failure indication and surfaces as
    /// `PresentationFailed` rather than a response.
    fn handle_user_accept(
        pending: &PendingAuthorization,
        authorization: PlatformAuthorization,
    ) -> SheetResult<PaymentResponse> {
        let payment_data = match authorization.token_payload {
            Some(payload) if !payload.is_null() => payload,
            _ => {
                error!(
                    request_id = %pending.request_id,
                    transaction_id = %authorization.transaction_identifier,
                    "authorized payment carried no token payload"
                );
                return Err(SheetError::PresentationFailed {
                    message: "authorized payment carried no token payload".to_string(),
                });
            }
        };

        info!(
            request_id = %pending.request_id,
            session_id = %pending.session_id,
            transaction_id = %authorization.transaction_identifier,
            "payment authorized"
        );

        Ok(PaymentResponse {
            request_id: pending.request_id.clone(),
            token: PaymentToken {
                transaction_identifier: authorization.transaction_identifier,
                payment_data,
                instrument: authorization.instrument,
            },
            payer_name: authorization.payer_name,
            payer_email: authorization.payer_email,
            payer_phone: authorization.payer_phone,
            shipping_contact: authorization.shipping_contact,
            shipping_option_id: authorization.shipping_option_id,
            authorized_at: Utc::now(),
        })
    }

    /// Whether the device can take payments at all
    pub async fn can_make_payments(&self) -> bool {
        self.driver.can_make_payments().await
    }

    /// Whether the device has an instrument on one of the given networks
    pub async fn can_make_payments_using_networks(&self, networks: &[CardNetwork]) -> bool {
        self.driver.can_make_payments_using_networks(networks).await
    }

    /// Open the platform's add-card / payment-setup flow
    pub async fn open_payment_setup(&self) -> SheetResult<()> {
        self.driver.open_payment_setup().await
    }

    fn select_method_entry<'a>(
        &self,
        method_data: &'a [PaymentMethodData],
    ) -> SheetResult<&'a PaymentMethodData> {
        if method_data.is_empty() {
            return Err(SheetError::InvalidMethodData(
                "method data list is empty".to_string(),
            ));
        }
        method_data
            .iter()
            .find(|m| SUPPORTED_METHOD_IDS.contains(&m.supported_methods.as_str()))
            .ok_or_else(|| {
                SheetError::InvalidMethodData(
                    "no entry declares a recognized payment method".to_string(),
                )
            })
    }
}

impl std::fmt::Debug for PaymentBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentBridge")
            .field("platform", &self.driver.platform_name())
            .field("merchant", &self.profile.display_name)
            .field("presenting", &self.is_presenting())
            .finish()
    }
}
