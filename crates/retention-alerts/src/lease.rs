//! Lease: the right of one channel to write into the store.
//!
//! Revoking takes the write side of the gate, so it waits for any delivery
//! being applied under this lease and no delivery is applied after it.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

#[derive(Debug, Clone, Default)]
pub struct Lease {
    token: CancellationToken,
    gate: Arc<RwLock<()>>,
}

impl Lease {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the owning task and fence off the store. Idempotent.
    pub fn revoke(&self) {
        let _fence = self.gate.write().unwrap_or_else(PoisonError::into_inner);
        self.token.cancel();
    }

    pub fn is_revoked(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the lease is revoked.
    pub fn revoked(&self) -> WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Hold the lease while writing. `None` once revoked. A revoke blocks
    /// until the returned guard is dropped.
    pub(crate) fn hold(&self) -> Option<RwLockReadGuard<'_, ()>> {
        let guard = self.gate.read().unwrap_or_else(PoisonError::into_inner);
        (!self.token.is_cancelled()).then_some(guard)
    }
}
