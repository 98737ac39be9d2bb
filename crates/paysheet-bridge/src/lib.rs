//! # paysheet-bridge
//!
//! Bridge between application checkout code and the platform's modal
//! payment sheet.
//!
//! The bridge does three jobs:
//!
//! 1. **Request building** - validate the caller's method data, details
//!    and options, and assemble the platform-native request
//! 2. **Presentation** - drive the platform sheet through a
//!    `PlatformSheet` driver, one sheet at a time
//! 3. **Settlement** - resolve the caller's future exactly once with the
//!    authorization token, a cancellation, or an error
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use paysheet_bridge::{MerchantProfile, PaymentBridge};
//! use paysheet_core::{PaymentDetails, PaymentMethodData, PaymentOptions, PaymentOutcome};
//!
//! // Merchant identity from PAYSHEET_* environment variables
//! let profile = MerchantProfile::from_env()?;
//! let bridge = PaymentBridge::new(driver, profile);
//!
//! let method_data = vec![PaymentMethodData::new("apple-pay")];
//! let details = PaymentDetails::with_total("Total", "18.49")
//!     .with_item("Espresso kit", "15.00")
//!     .with_item("Shipping", "3.49");
//!
//! let request = bridge.create_request(&method_data, &details, &PaymentOptions::default())?;
//! match bridge.present(request).await? {
//!     PaymentOutcome::Authorized(response) => fulfill(response.token),
//!     PaymentOutcome::Cancelled => {} // user closed the sheet, not an error
//! }
//! ```
//!
//! Cancellation is an ordinary outcome, overlap is the `AlreadyPresenting`
//! error, and nothing here retries a failed presentation.

pub mod bridge;
pub mod convert;
pub mod profile;
mod session;
pub mod unsupported;

// Re-exports
pub use bridge::{PaymentBridge, SUPPORTED_METHOD_IDS};
pub use profile::{Environment, MerchantProfile};
pub use session::PendingAuthorization;
pub use unsupported::UnsupportedSheet;
