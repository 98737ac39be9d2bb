//! # Payment Request Types
//!
//! Boundary types for building a platform payment-sheet request.
//!
//! The inbound types (`PaymentMethodData`, `PaymentDetails`,
//! `PaymentOptions`) mirror the dictionaries the application runtime hands
//! across the boundary: camelCase keys, amounts as decimal strings, unknown
//! keys ignored. `PlatformRequest` is the validated, fully-resolved value a
//! `PlatformSheet` driver presents.

use crate::network::{CardNetwork, MerchantCapability};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One accepted payment method, as declared by the caller.
///
/// Immutable; constructed fresh per request and discarded once the request
/// is submitted to the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodData {
    /// Method identifier (e.g., "apple-pay")
    pub supported_methods: String,

    /// Method-specific configuration
    #[serde(default)]
    pub data: MethodConfig,
}

impl PaymentMethodData {
    /// Create method data for the given method identifier
    pub fn new(supported_methods: impl Into<String>) -> Self {
        Self {
            supported_methods: supported_methods.into(),
            data: MethodConfig::default(),
        }
    }

    /// Builder: set the method configuration
    pub fn with_config(mut self, data: MethodConfig) -> Self {
        self.data = data;
        self
    }
}

/// Method-specific configuration carried in `PaymentMethodData.data`.
///
/// Every field is optional; `create_request` falls back to the bridge's
/// merchant profile for anything the caller omits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodConfig {
    /// Registered merchant identifier (e.g., "merchant.io.enginevector.shop")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_identifier: Option<String>,

    /// Caller-declared card networks, raw names (unknowns dropped later)
    #[serde(default)]
    pub supported_networks: Vec<String>,

    /// Caller-declared capability flags, raw names (unknowns dropped later)
    #[serde(default)]
    pub merchant_capabilities: Vec<String>,

    /// ISO 3166 country code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,

    /// ISO 4217 currency code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
}

/// One display line item: a label and an amount as a decimal string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayItem {
    pub label: String,

    /// Decimal string (e.g., "9.99"); validated at conversion time
    pub amount: String,
}

impl DisplayItem {
    pub fn new(label: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            amount: amount.into(),
        }
    }
}

/// The transaction's display items and total. Immutable per request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    /// Caller-supplied request id; generated when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Line items shown on the sheet, in display order
    #[serde(default)]
    pub display_items: Vec<DisplayItem>,

    /// Grand total; must be present and non-negative to build a request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<DisplayItem>,
}

impl PaymentDetails {
    /// Details with a total and no display items
    pub fn with_total(label: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            id: None,
            display_items: Vec::new(),
            total: Some(DisplayItem::new(label, amount)),
        }
    }

    /// Builder: append a display item
    pub fn with_item(mut self, label: impl Into<String>, amount: impl Into<String>) -> Self {
        self.display_items.push(DisplayItem::new(label, amount));
        self
    }

    /// Builder: set the caller request id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// How the purchase reaches the payer, shown as sheet wording.
///
/// An unrecognized string in deserialized input falls back to `Shipping`
/// (same ignore-not-error policy as unknown option keys).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "String")]
pub enum ShippingType {
    Delivery,
    StorePickup,
    ServicePickup,
    /// Default wording; also the fallback for unrecognized input strings
    Shipping,
}

impl From<String> for ShippingType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "delivery" => ShippingType::Delivery,
            "storePickup" => ShippingType::StorePickup,
            "servicePickup" => ShippingType::ServicePickup,
            // "shipping" and anything the platform does not yet name
            _ => ShippingType::Shipping,
        }
    }
}

impl Default for ShippingType {
    fn default() -> Self {
        ShippingType::Shipping
    }
}

/// Request options: which contact fields to collect and how shipping is
/// worded. Unrecognized keys in deserialized input are ignored, not errors.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentOptions {
    pub request_payer_name: bool,
    pub request_payer_email: bool,
    pub request_payer_phone: bool,
    pub request_shipping: bool,
    pub shipping_type: ShippingType,
}

/// Contact fields the sheet must collect, derived from `PaymentOptions`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    Name,
    Email,
    Phone,
    PostalAddress,
}

/// One platform summary item: a label and an exact decimal amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryItem {
    pub label: String,
    pub amount: Decimal,
}

impl SummaryItem {
    pub fn new(label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// The validated platform-native request, ready for presentation.
///
/// Built by `PaymentBridge::create_request`; consumed by a `PlatformSheet`
/// driver. Building one has no side effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformRequest {
    /// Request id, caller-supplied or generated
    pub request_id: String,

    /// Merchant identifier the platform verifies
    pub merchant_identifier: String,

    /// ISO 3166 country code
    pub country_code: String,

    /// ISO 4217 currency code
    pub currency_code: String,

    /// Card networks, filtered to the allow-list, input order preserved
    pub supported_networks: Vec<CardNetwork>,

    /// Capability flags; never empty
    pub merchant_capabilities: Vec<MerchantCapability>,

    /// Display items in order, then the synthesized grand-total item
    pub summary_items: Vec<SummaryItem>,

    /// Contact fields the sheet collects
    #[serde(default)]
    pub required_contact_fields: Vec<ContactField>,

    /// Shipping wording on the sheet
    #[serde(default)]
    pub shipping_type: ShippingType,
}

impl PlatformRequest {
    /// The grand-total item (always last)
    pub fn total(&self) -> Option<&SummaryItem> {
        self.summary_items.last()
    }
}
