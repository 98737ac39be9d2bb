//! # Platform Sheet Driver Trait
//!
//! Trait seam to the operating system's payment framework. The framework is
//! an opaque, trusted collaborator: drivers present its modal sheet and
//! relay its one-shot delegate callback; they never reimplement
//! authorization, tokenization, or network validation.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PlatformSheet (trait)                    │
//! │  ├── can_make_payments()                                    │
//! │  ├── present(request, delegate)                             │
//! │  └── open_payment_setup()                                   │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!          ┌─────────────────┼─────────────────┐
//!          │                 │                 │
//!  ┌───────┴───────┐ ┌───────┴───────┐ ┌───────┴───────┐
//!  │  Unsupported  │ │   MockSheet   │ │    PassKit    │
//!  │     Sheet     │ │  (scripted)   │ │ (out-of-tree) │
//!  └───────────────┘ └───────────────┘ └───────────────┘
//! ```
//!
//! `present` returns once the sheet is up; the terminal result arrives later
//! through the [`SheetDelegate`], from whatever thread the platform delivers
//! callbacks on.

use crate::error::{SheetError, SheetResult};
use crate::network::CardNetwork;
use crate::request::PlatformRequest;
use crate::response::PlatformAuthorization;
use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::oneshot;
use tracing::warn;

/// Terminal event for one presentation
#[derive(Debug)]
pub enum SheetEvent {
    /// User confirmed payment
    Authorized(PlatformAuthorization),
    /// User dismissed the sheet
    Cancelled,
    /// Platform reported a failure mid-presentation
    Failed(SheetError),
}

impl SheetEvent {
    /// Event kind for log fields
    pub fn kind(&self) -> &'static str {
        match self {
            SheetEvent::Authorized(_) => "authorized",
            SheetEvent::Cancelled => "cancelled",
            SheetEvent::Failed(_) => "failed",
        }
    }
}

/// One-shot resolver a driver fires when the sheet reaches a terminal state.
///
/// Wraps the platform's delegate-callback pattern as a single-resolution
/// handoff: the inner sender is taken on the first call, so a duplicate
/// platform callback is logged and dropped rather than delivered twice. The
/// receiving end lives with the awaiting caller; sending from the platform's
/// callback thread marshals the result back to the caller's context.
#[derive(Debug)]
pub struct SheetDelegate {
    request_id: String,
    tx: Mutex<Option<oneshot::Sender<SheetEvent>>>,
}

impl SheetDelegate {
    /// Create a delegate and the receiver its result arrives on
    pub fn channel(request_id: impl Into<String>) -> (Self, oneshot::Receiver<SheetEvent>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                request_id: request_id.into(),
                tx: Mutex::new(Some(tx)),
            },
            rx,
        )
    }

    /// Id of the request this delegate belongs to
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// True once a terminal event has been delivered (or attempted)
    pub fn is_settled(&self) -> bool {
        self.tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    /// Platform delegate reported user acceptance
    pub fn authorized(&self, authorization: PlatformAuthorization) {
        self.deliver(SheetEvent::Authorized(authorization));
    }

    /// Platform delegate reported dismissal without confirmation
    pub fn cancelled(&self) {
        self.deliver(SheetEvent::Cancelled);
    }

    /// Platform delegate reported a failure
    pub fn failed(&self, error: SheetError) {
        self.deliver(SheetEvent::Failed(error));
    }

    fn deliver(&self, event: SheetEvent) {
        let sender = self
            .tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match sender {
            Some(tx) => {
                // The caller may have abandoned interest; the slot guard on
                // its side already released the presentation state.
                if tx.send(event).is_err() {
                    warn!(
                        request_id = %self.request_id,
                        "sheet result arrived after the caller stopped waiting"
                    );
                }
            }
            None => warn!(
                request_id = %self.request_id,
                kind = event.kind(),
                "sheet delegate already settled, dropping duplicate result"
            ),
        }
    }
}

/// Driver over one platform payment framework.
///
/// Implementations present the platform's modal payment sheet and route its
/// delegate callbacks into the supplied [`SheetDelegate`] exactly once.
#[async_trait]
pub trait PlatformSheet: Send + Sync {
    /// Whether the device can take payments at all
    async fn can_make_payments(&self) -> bool;

    /// Whether the device has an instrument on at least one of the given
    /// networks. Empty input is always false.
    async fn can_make_payments_using_networks(&self, networks: &[CardNetwork]) -> bool {
        if networks.is_empty() {
            return false;
        }
        self.can_make_payments().await
    }

    /// Present the modal sheet for `request`.
    ///
    /// Returns once the sheet is up (or refuses with an error). The terminal
    /// result is delivered later through `delegate`, possibly from a
    /// different thread.
    async fn present(
        &self,
        request: &PlatformRequest,
        delegate: SheetDelegate,
    ) -> SheetResult<()>;

    /// Open the platform's add-card / payment-setup flow
    async fn open_payment_setup(&self) -> SheetResult<()> {
        Err(SheetError::PlatformUnavailable)
    }

    /// Driver name (for logging)
    fn platform_name(&self) -> &'static str;
}

/// Type alias for a boxed platform driver (dynamic dispatch)
pub type BoxedPlatformSheet = Arc<dyn PlatformSheet>;
