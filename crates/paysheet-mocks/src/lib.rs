//! # paysheet-mocks
//!
//! Scripted in-memory [`PlatformSheet`] driver for tests and sandbox runs.
//! Every presentation is recorded and settled according to the configured
//! [`MockBehavior`]. The `Hold` behavior parks the delegate so a test can
//! settle it later from another task, the way a real platform delivers its
//! delegate callback from another thread.
//!
//! ```rust,ignore
//! let sheet = Arc::new(MockSheet::new());
//! sheet.set_behavior(MockBehavior::Cancel).await;
//! let bridge = PaymentBridge::new(sheet.clone(), profile);
//! ```

use async_trait::async_trait;
use paysheet_core::{
    InstrumentInfo, PlatformAuthorization, PlatformRequest, PlatformSheet, SheetDelegate,
    SheetError, SheetResult,
};
use serde_json::json;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

/// What the mock does with each presentation
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Settle immediately with the given authorization
    Authorize(PlatformAuthorization),
    /// Settle immediately as a user dismissal
    Cancel,
    /// Refuse the presentation outright with a failure message
    RefusePresentation(String),
    /// Bring the sheet up, then report a platform failure
    FailAfterPresent(String),
    /// Bring the sheet up and park the delegate for a later `*_held` call
    Hold,
}

/// Scripted payment-sheet driver.
///
/// Available by default, and authorizes every presentation with
/// [`sample_authorization`] until scripted otherwise.
pub struct MockSheet {
    available: AtomicBool,
    behavior: RwLock<MockBehavior>,
    held: Mutex<Option<SheetDelegate>>,
    presented: RwLock<Vec<PlatformRequest>>,
    setup_opened: AtomicUsize,
}

impl MockSheet {
    /// Mock that authorizes every presentation
    pub fn new() -> Self {
        Self {
            available: AtomicBool::new(true),
            behavior: RwLock::new(MockBehavior::Authorize(sample_authorization())),
            held: Mutex::new(None),
            presented: RwLock::new(Vec::new()),
            setup_opened: AtomicUsize::new(0),
        }
    }

    /// Mock scripted with a fixed behavior
    pub fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior: RwLock::new(behavior),
            ..Self::new()
        }
    }

    /// Script what the next presentations do
    pub async fn set_behavior(&self, behavior: MockBehavior) {
        *self.behavior.write().await = behavior;
    }

    /// Flip device availability; unavailable mocks refuse capability checks
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of sheets actually brought up (refusals do not count)
    pub async fn presented_count(&self) -> usize {
        self.presented.read().await.len()
    }

    /// The most recently presented request, if any
    pub async fn last_request(&self) -> Option<PlatformRequest> {
        self.presented.read().await.last().cloned()
    }

    /// Number of times the payment-setup flow was opened
    pub fn setup_opened_count(&self) -> usize {
        self.setup_opened.load(Ordering::SeqCst)
    }

    /// Whether a presentation is parked waiting for a `*_held` call
    pub async fn has_held(&self) -> bool {
        self.held.lock().await.is_some()
    }

    /// Authorize the parked presentation. Returns false when none is parked.
    pub async fn authorize_held(&self, authorization: PlatformAuthorization) -> bool {
        match self.held.lock().await.take() {
            Some(delegate) => {
                delegate.authorized(authorization);
                true
            }
            None => false,
        }
    }

    /// Dismiss the parked presentation. Returns false when none is parked.
    pub async fn cancel_held(&self) -> bool {
        match self.held.lock().await.take() {
            Some(delegate) => {
                delegate.cancelled();
                true
            }
            None => false,
        }
    }

    /// Fail the parked presentation. Returns false when none is parked.
    pub async fn fail_held(&self, error: SheetError) -> bool {
        match self.held.lock().await.take() {
            Some(delegate) => {
                delegate.failed(error);
                true
            }
            None => false,
        }
    }

    async fn record(&self, request: &PlatformRequest) {
        self.presented.write().await.push(request.clone());
        debug!(request_id = %request.request_id, "mock sheet presented");
    }
}

impl Default for MockSheet {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformSheet for MockSheet {
    async fn can_make_payments(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn present(
        &self,
        request: &PlatformRequest,
        delegate: SheetDelegate,
    ) -> SheetResult<()> {
        match self.behavior.read().await.clone() {
            MockBehavior::RefusePresentation(message) => {
                debug!(request_id = %request.request_id, "mock refused to present");
                Err(SheetError::PresentationFailed { message })
            }
            MockBehavior::Authorize(authorization) => {
                self.record(request).await;
                delegate.authorized(authorization);
                Ok(())
            }
            MockBehavior::Cancel => {
                self.record(request).await;
                delegate.cancelled();
                Ok(())
            }
            MockBehavior::FailAfterPresent(message) => {
                self.record(request).await;
                delegate.failed(SheetError::PresentationFailed { message });
                Ok(())
            }
            MockBehavior::Hold => {
                self.record(request).await;
                *self.held.lock().await = Some(delegate);
                Ok(())
            }
        }
    }

    async fn open_payment_setup(&self) -> SheetResult<()> {
        self.setup_opened.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn platform_name(&self) -> &'static str {
        "mock"
    }
}

/// A plausible authorization carrying an EC_v1-style token payload
pub fn sample_authorization() -> PlatformAuthorization {
    PlatformAuthorization::new(
        format!("txn-{}", Uuid::new_v4()),
        json!({
            "version": "EC_v1",
            "data": "mock-encrypted-payment-data",
            "signature": "mock-signature",
            "header": {
                "ephemeralPublicKey": "mock-ephemeral-key",
                "publicKeyHash": "mock-key-hash",
                "transactionId": "mock-transaction"
            }
        }),
    )
    .with_instrument(InstrumentInfo {
        display_name: Some("Visa 4242".to_string()),
        network: Some("Visa".to_string()),
        instrument_type: Some("credit".to_string()),
    })
}
