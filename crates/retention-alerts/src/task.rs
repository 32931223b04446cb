//! Handle to a spawned producer or consumer task.

use tokio::task::JoinHandle;

use crate::lease::Lease;

/// Owns a task together with the lease that stops it. Dropping the handle
/// revokes the lease, so a forgotten handle never leaks a recurring writer.
#[derive(Debug)]
pub(crate) struct TaskHandle {
    lease: Lease,
    task: Option<JoinHandle<()>>,
}

impl TaskHandle {
    pub(crate) fn new(lease: Lease, task: JoinHandle<()>) -> Self {
        Self {
            lease,
            task: Some(task),
        }
    }

    /// Revoke the lease. Once this returns nothing written under it reaches
    /// the store.
    pub(crate) fn cancel(&self) {
        self.lease.revoke();
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Cancel and wait for the task to exit.
    pub(crate) async fn join(mut self) {
        self.lease.revoke();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if e.is_panic() {
                    tracing::error!(error = %e, "alert task panicked");
                }
            }
        }
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.lease.revoke();
    }
}
