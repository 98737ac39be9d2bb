//! # Authorization Result Types
//!
//! Plain-data results crossing back from the platform payment framework.
//! Platform object types never cross this boundary: drivers flatten the
//! native authorization into `PlatformAuthorization`, and the bridge turns
//! that into the `PaymentResponse` the caller receives.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display info for the instrument the user paid with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentInfo {
    /// e.g., "Visa 1234"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Network name as the platform reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,

    /// "debit", "credit", "prepaid", ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument_type: Option<String>,
}

/// A postal address collected by the sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
}

/// A contact collected by the sheet (shipping or billing)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_address: Option<PostalAddress>,
}

/// Raw acceptance result a driver hands to the bridge.
///
/// `token_payload` is the platform's opaque token blob; `None` (or JSON
/// null) means extraction failed on the platform side and the bridge reports
/// a presentation failure instead of a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformAuthorization {
    /// Platform transaction identifier
    pub transaction_identifier: String,

    /// Opaque payment-token payload as the platform emitted it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_payload: Option<serde_json::Value>,

    /// Instrument display info
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument: Option<InstrumentInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer_phone: Option<String>,

    /// Shipping contact, when the request asked for one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_contact: Option<ContactInfo>,

    /// Id of the shipping option in effect when the user confirmed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_option_id: Option<String>,
}

impl PlatformAuthorization {
    /// Minimal authorization with a token payload
    pub fn new(
        transaction_identifier: impl Into<String>,
        token_payload: serde_json::Value,
    ) -> Self {
        Self {
            transaction_identifier: transaction_identifier.into(),
            token_payload: Some(token_payload),
            instrument: None,
            payer_name: None,
            payer_email: None,
            payer_phone: None,
            shipping_contact: None,
            shipping_option_id: None,
        }
    }

    /// Builder: set instrument display info
    pub fn with_instrument(mut self, instrument: InstrumentInfo) -> Self {
        self.instrument = Some(instrument);
        self
    }

    /// Builder: set payer email
    pub fn with_payer_email(mut self, email: impl Into<String>) -> Self {
        self.payer_email = Some(email.into());
        self
    }

    /// Builder: set shipping contact
    pub fn with_shipping_contact(mut self, contact: ContactInfo) -> Self {
        self.shipping_contact = Some(contact);
        self
    }
}

/// The opaque payment token handed to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentToken {
    /// Platform transaction identifier
    pub transaction_identifier: String,

    /// Opaque token payload; forwarded verbatim to the merchant backend
    pub payment_data: serde_json::Value,

    /// Instrument display info, when the platform supplied it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument: Option<InstrumentInfo>,
}

/// What the caller receives when the user confirms payment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    /// Id of the request this response answers
    pub request_id: String,

    /// The extracted payment token
    pub token: PaymentToken,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer_phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_contact: Option<ContactInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_option_id: Option<String>,

    /// When the bridge accepted the authorization
    pub authorized_at: DateTime<Utc>,
}

/// Terminal outcome of one presentation.
///
/// Cancellation is a normal outcome, not an error: the future resolves with
/// `Cancelled` and the bridge returns to idle.
#[derive(Debug, Clone)]
pub enum PaymentOutcome {
    /// User confirmed; token and requested fields attached
    Authorized(PaymentResponse),
    /// User dismissed the sheet without confirming
    Cancelled,
}

impl PaymentOutcome {
    /// Returns the response when the user authorized
    pub fn authorized(&self) -> Option<&PaymentResponse> {
        match self {
            PaymentOutcome::Authorized(response) => Some(response),
            PaymentOutcome::Cancelled => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, PaymentOutcome::Cancelled)
    }
}
