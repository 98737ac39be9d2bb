//! # Presentation Session
//!
//! The single-owner current-session value and the one-slot guard around it.
//!
//! The platform UI is modal: at most one payment sheet per app session. The
//! bridge mirrors that with a single `Mutex<Option<PendingAuthorization>>`.
//! A session is created when presentation begins and destroyed exactly once
//! when the result arrives; the guard frees the slot on drop, so the bridge
//! returns to idle on every exit path, including a caller that stops
//! awaiting mid-presentation.

use chrono::{DateTime, Utc};
use paysheet_core::{SheetError, SheetResult};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;
use uuid::Uuid;

/// One in-flight payment-sheet presentation
#[derive(Debug, Clone)]
pub struct PendingAuthorization {
    /// Session id (generated per presentation, never reused)
    pub session_id: Uuid,

    /// Id of the request being presented
    pub request_id: String,

    /// When presentation began
    pub started_at: DateTime<Utc>,
}

impl PendingAuthorization {
    fn new(request_id: impl Into<String>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            request_id: request_id.into(),
            started_at: Utc::now(),
        }
    }
}

/// The single presentation slot. Clones share the slot.
#[derive(Debug, Clone, Default)]
pub(crate) struct SessionSlot {
    inner: Arc<Mutex<Option<PendingAuthorization>>>,
}

impl SessionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a presentation is in flight
    pub fn is_presenting(&self) -> bool {
        self.lock().is_some()
    }

    /// The session currently in flight, if any
    pub fn current(&self) -> Option<PendingAuthorization> {
        self.lock().clone()
    }

    /// Claim the slot for a new presentation.
    ///
    /// Fails with `AlreadyPresenting` while another presentation is in
    /// flight, leaving that presentation unaffected.
    pub fn begin(&self, request_id: &str) -> SheetResult<SessionGuard> {
        let mut slot = self.lock();
        if slot.is_some() {
            return Err(SheetError::AlreadyPresenting);
        }

        let pending = PendingAuthorization::new(request_id);
        debug!(
            session_id = %pending.session_id,
            request_id = %pending.request_id,
            "payment session opened"
        );
        *slot = Some(pending.clone());

        Ok(SessionGuard {
            slot: Arc::clone(&self.inner),
            pending,
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<PendingAuthorization>> {
        // Never held across an await; poison recovery keeps the slot usable
        // if a holder panicked.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Holds the slot for the duration of one presentation; frees it on drop
#[derive(Debug)]
pub(crate) struct SessionGuard {
    slot: Arc<Mutex<Option<PendingAuthorization>>>,
    pending: PendingAuthorization,
}

impl SessionGuard {
    pub fn pending(&self) -> &PendingAuthorization {
        &self.pending
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
        debug!(
            session_id = %self.pending.session_id,
            request_id = %self.pending.request_id,
            "payment session closed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_rejects_overlap() {
        let slot = SessionSlot::new();
        let guard = slot.begin("req-1").unwrap();

        assert!(slot.is_presenting());
        assert!(matches!(
            slot.begin("req-2"),
            Err(SheetError::AlreadyPresenting)
        ));

        // The first presentation is untouched by the rejected second
        assert_eq!(slot.current().unwrap().request_id, "req-1");
        assert_eq!(guard.pending().request_id, "req-1");
    }

    #[test]
    fn test_guard_frees_slot_on_drop() {
        let slot = SessionSlot::new();
        {
            let _guard = slot.begin("req-1").unwrap();
            assert!(slot.is_presenting());
        }
        assert!(!slot.is_presenting());

        // A new presentation gets a fresh session, never a reused one
        let first = slot.begin("req-2").unwrap().pending().session_id;
        let second = slot.begin("req-3").unwrap().pending().session_id;
        assert_ne!(first, second);
    }

    #[test]
    fn test_clones_share_the_slot() {
        let slot = SessionSlot::new();
        let clone = slot.clone();

        let _guard = slot.begin("req-1").unwrap();
        assert!(clone.is_presenting());
        assert!(matches!(
            clone.begin("req-2"),
            Err(SheetError::AlreadyPresenting)
        ));
    }
}
