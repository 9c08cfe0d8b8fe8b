//! Single-flight token refresh.
//!
//! The first request to hit an auth failure becomes the leader and holds a
//! [`RefreshLease`]; every request failing while the lease is out is queued
//! as a [`PendingRefresh`]. Settling the lease drains the queue in FIFO order
//! and clears the flag under the same lock, so no request can observe
//! `refreshing == false` with a non-empty queue. The lock is never held
//! across an `.await`.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use tokio::sync::oneshot;
use tracing::debug;

use super::error::RefreshError;

/// How a refresh attempt ended, as seen by queued requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Resolved(String),
    Rejected(RefreshError),
}

#[derive(Default)]
struct RefreshState {
    refreshing: bool,
    pending: VecDeque<oneshot::Sender<Outcome>>,
}

#[derive(Default)]
pub struct RefreshCoordinator {
    state: Mutex<RefreshState>,
}

/// Result of asking to refresh.
pub enum Ticket<'a> {
    /// No refresh was running; the caller must perform it and settle the lease.
    Leader(RefreshLease<'a>),
    /// A refresh is already running; wait for its outcome.
    Queued(PendingRefresh),
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RefreshState> {
        // Settling happens in Drop too; never panic there on poison.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Become the refresh leader, or join the queue of the running refresh.
    pub fn begin(&self) -> Ticket<'_> {
        let mut state = self.lock();
        if !state.refreshing {
            state.refreshing = true;
            return Ticket::Leader(RefreshLease {
                coordinator: self,
                settled: false,
            });
        }
        let (tx, rx) = oneshot::channel();
        state.pending.push_back(tx);
        debug!("Queued behind running refresh ({} waiting)", state.pending.len());
        Ticket::Queued(PendingRefresh { rx })
    }

    pub fn is_refreshing(&self) -> bool {
        self.lock().refreshing
    }

    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    fn settle(&self, outcome: Outcome) -> usize {
        let mut state = self.lock();
        let waiters = state.pending.len();
        for waiter in state.pending.drain(..) {
            // A waiter whose caller went away is simply skipped.
            let _ = waiter.send(outcome.clone());
        }
        state.refreshing = false;
        waiters
    }
}

/// Proof that the holder is the one running the refresh. Dropping it
/// unsettled rejects every waiter with [`RefreshError::Abandoned`].
pub struct RefreshLease<'a> {
    coordinator: &'a RefreshCoordinator,
    settled: bool,
}

impl RefreshLease<'_> {
    /// Hand the new token to every waiter, oldest first. Returns how many waited.
    pub fn resolve(mut self, token: String) -> usize {
        self.settled = true;
        self.coordinator.settle(Outcome::Resolved(token))
    }

    /// Fail every waiter with the refresh error, oldest first.
    pub fn reject(mut self, error: RefreshError) -> usize {
        self.settled = true;
        self.coordinator.settle(Outcome::Rejected(error))
    }
}

impl Drop for RefreshLease<'_> {
    fn drop(&mut self) {
        if !self.settled {
            let waiters = self
                .coordinator
                .settle(Outcome::Rejected(RefreshError::Abandoned));
            debug!("Refresh lease dropped unsettled; rejected {} waiters", waiters);
        }
    }
}

/// A queued request waiting for the running refresh.
pub struct PendingRefresh {
    rx: oneshot::Receiver<Outcome>,
}

impl PendingRefresh {
    pub async fn wait(self) -> Outcome {
        self.rx
            .await
            .unwrap_or(Outcome::Rejected(RefreshError::Abandoned))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leader(coordinator: &RefreshCoordinator) -> RefreshLease<'_> {
        match coordinator.begin() {
            Ticket::Leader(lease) => lease,
            Ticket::Queued(_) => panic!("expected to lead the refresh"),
        }
    }

    fn queued(coordinator: &RefreshCoordinator) -> PendingRefresh {
        match coordinator.begin() {
            Ticket::Queued(pending) => pending,
            Ticket::Leader(_) => panic!("expected to be queued"),
        }
    }

    #[tokio::test]
    async fn test_single_leader_and_fifo_resolution() {
        let coordinator = RefreshCoordinator::new();
        let lease = leader(&coordinator);
        let first = queued(&coordinator);
        let second = queued(&coordinator);
        assert!(coordinator.is_refreshing());
        assert_eq!(coordinator.pending_len(), 2);

        assert_eq!(lease.resolve("T2".to_string()), 2);
        assert!(!coordinator.is_refreshing());
        assert_eq!(coordinator.pending_len(), 0);
        assert_eq!(first.wait().await, Outcome::Resolved("T2".to_string()));
        assert_eq!(second.wait().await, Outcome::Resolved("T2".to_string()));

        // The next failure starts a fresh refresh.
        let _lease = leader(&coordinator);
    }

    #[tokio::test]
    async fn test_reject_reaches_every_waiter() {
        let coordinator = RefreshCoordinator::new();
        let lease = leader(&coordinator);
        let waiter = queued(&coordinator);
        let error = RefreshError::Rejected {
            code: "C0002".to_string(),
            message: "refresh token expired".to_string(),
        };
        assert_eq!(lease.reject(error.clone()), 1);
        assert_eq!(waiter.wait().await, Outcome::Rejected(error));
        assert!(!coordinator.is_refreshing());
    }

    #[tokio::test]
    async fn test_dropped_lease_releases_queue() {
        let coordinator = RefreshCoordinator::new();
        let waiter = {
            let _lease = leader(&coordinator);
            queued(&coordinator)
        };
        assert!(!coordinator.is_refreshing());
        assert_eq!(
            waiter.wait().await,
            Outcome::Rejected(RefreshError::Abandoned)
        );
    }

    #[tokio::test]
    async fn test_gone_waiter_does_not_block_the_rest() {
        let coordinator = RefreshCoordinator::new();
        let lease = leader(&coordinator);
        drop(queued(&coordinator));
        let kept = queued(&coordinator);
        assert_eq!(lease.resolve("T3".to_string()), 2);
        assert_eq!(kept.wait().await, Outcome::Resolved("T3".to_string()));
    }
}
