//! Switch that makes the CRM endpoints emulate a failing backend.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared on/off flag. While tripped, every CRM endpoint answers with a
/// server error; chat and test-support endpoints are unaffected.
#[derive(Debug, Clone, Default)]
pub struct FaultSwitch {
    tripped: Arc<AtomicBool>,
}

impl FaultSwitch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trip(&self) {
        if !self.tripped.swap(true, Ordering::SeqCst) {
            tracing::info!("Backend fault emulation enabled");
        }
    }

    pub fn is_tripped(&self) -> bool {
        self.tripped.load(Ordering::SeqCst)
    }

    pub fn clear(&self) {
        self.tripped.store(false, Ordering::SeqCst);
    }
}
