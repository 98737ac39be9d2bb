//! # Sheet Error Types
//!
//! Typed error handling for the paysheet bridge.
//! All bridge operations return `Result<T, SheetError>`.
//!
//! User cancellation is deliberately absent: dismissing the sheet is a
//! normal terminal outcome and surfaces as `PaymentOutcome::Cancelled`.

use thiserror::Error;

/// Core error type for all payment-sheet operations
#[derive(Debug, Error)]
pub enum SheetError {
    /// Configuration errors (missing env vars, malformed profile)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Method-data list empty or no recognized payment method
    #[error("Invalid method data: {0}")]
    InvalidMethodData(String),

    /// Payment details missing or carrying an unusable total
    #[error("Invalid details: {0}")]
    InvalidDetails(String),

    /// Display-item amount failed to parse as a non-negative decimal
    #[error("Invalid amount for \"{label}\": {value}")]
    InvalidAmount { label: String, value: String },

    /// Details carry no total to synthesize the grand-total item from
    #[error("Payment details carry no total")]
    MissingTotal,

    /// A payment sheet is already on screen; the platform UI is modal
    #[error("A payment sheet is already being presented")]
    AlreadyPresenting,

    /// Platform payment capability absent or disabled on this device
    #[error("Platform payment framework unavailable")]
    PlatformUnavailable,

    /// Platform reported a failure while presenting or resolving the sheet
    #[error("Presentation failed: {message}")]
    PresentationFailed { message: String },
}

impl SheetError {
    /// Returns true for errors raised at request-construction time,
    /// before any UI is shown.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SheetError::InvalidMethodData(_)
                | SheetError::InvalidDetails(_)
                | SheetError::InvalidAmount { .. }
                | SheetError::MissingTotal
        )
    }

    /// Stable error code for log fields and the runtime boundary
    pub fn code(&self) -> &'static str {
        match self {
            SheetError::Configuration(_) => "configuration",
            SheetError::InvalidMethodData(_) => "invalid_method_data",
            SheetError::InvalidDetails(_) => "invalid_details",
            SheetError::InvalidAmount { .. } => "invalid_amount",
            SheetError::MissingTotal => "missing_total",
            SheetError::AlreadyPresenting => "already_presenting",
            SheetError::PlatformUnavailable => "platform_unavailable",
            SheetError::PresentationFailed { .. } => "presentation_failed",
        }
    }
}

/// Result type alias for payment-sheet operations
pub type SheetResult<T> = Result<T, SheetError>;
