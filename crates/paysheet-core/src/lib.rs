//! # paysheet-core
//!
//! Core types and the platform driver trait for the paysheet bridge.
//!
//! This crate provides:
//! - `PlatformSheet` trait for platform payment-framework drivers
//! - `SheetDelegate` one-shot handoff from the platform callback thread
//! - `PaymentMethodData`, `PaymentDetails`, `PaymentOptions` boundary input
//! - `PlatformRequest` and `SummaryItem` for the built native request
//! - `PaymentOutcome`, `PaymentResponse`, `PaymentToken` result types
//! - `SheetError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use paysheet_core::{PaymentDetails, PaymentMethodData, PaymentOutcome};
//!
//! // Describe the purchase
//! let details = PaymentDetails::with_total("Total", "9.99")
//!     .with_item("Widget", "9.99");
//!
//! // Build and present through a bridge (see paysheet-bridge)
//! let request = bridge.create_request(&method_data, &details, &options)?;
//! match bridge.present(request).await? {
//!     PaymentOutcome::Authorized(response) => fulfill(response.token),
//!     PaymentOutcome::Cancelled => {}
//! }
//! ```

pub mod driver;
pub mod error;
pub mod network;
pub mod request;
pub mod response;

// Re-exports for convenience
pub use driver::{BoxedPlatformSheet, PlatformSheet, SheetDelegate, SheetEvent};
pub use error::{SheetError, SheetResult};
pub use network::{CardNetwork, MerchantCapability};
pub use request::{
    ContactField, DisplayItem, MethodConfig, PaymentDetails, PaymentMethodData, PaymentOptions,
    PlatformRequest, ShippingType, SummaryItem,
};
pub use response::{
    ContactInfo, InstrumentInfo, PaymentOutcome, PaymentResponse, PaymentToken,
    PlatformAuthorization, PostalAddress,
};
