use std::sync::{Mutex, MutexGuard};

use super::error::ConversionError;
use super::types::ConversionStatus;

/// Tracks the lifecycle of the one conversion allowed in flight.
// NOTE: Using std::sync::Mutex since the lock is never held across .await.
#[derive(Debug, Default)]
pub(super) struct ConversionGate {
    status: Mutex<ConversionStatus>,
}

impl ConversionGate {
    fn lock(&self) -> MutexGuard<'_, ConversionStatus> {
        // The guarded value is a plain enum; a poisoned lock still holds a valid one.
        self.status.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(super) fn status(&self) -> ConversionStatus {
        *self.lock()
    }

    /// Move to Pending, or reject when a conversion is already pending.
    pub(super) fn begin(&self) -> Result<InFlight<'_>, ConversionError> {
        let mut status = self.lock();
        if status.is_pending() {
            return Err(ConversionError::busy("A conversion is already in progress"));
        }
        *status = ConversionStatus::Pending;
        Ok(InFlight {
            gate: self,
            settled: false,
        })
    }
}

/// Held for the duration of one request. Dropping it unsettled (the caller
/// abandoned the future) returns the gate to Idle.
pub(super) struct InFlight<'a> {
    gate: &'a ConversionGate,
    settled: bool,
}

impl InFlight<'_> {
    pub(super) fn settle<T>(
        mut self,
        result: Result<T, ConversionError>,
    ) -> Result<T, ConversionError> {
        *self.gate.lock() = if result.is_ok() {
            ConversionStatus::Succeeded
        } else {
            ConversionStatus::Failed
        };
        self.settled = true;
        result
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut status = self.gate.lock();
        if status.is_pending() {
            *status = ConversionStatus::Idle;
        }
    }
}
