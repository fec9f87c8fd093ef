//! # Confirmation Workflow
//!
//! Takes a pending entry from *proposed* to *confirmed* or *rejected*.
//!
//! ```text
//! state.rs     : WorkflowState and Resolution
//! capability.rs: SubmissionService / WalletDirectory collaborator traits
//! view.rs      : ViewToken: liveness of the requesting view
//! ```
//!
//! ## Rules
//!
//! - At most one submission is in flight per entry. A second confirm or
//!   reject while one is running is refused with
//!   [`WorkflowError::AlreadyInFlight`], never queued silently or applied
//!   twice. For a batch the parent and every member are claimed together.
//! - A batch goes out as one request for the whole set.
//! - On success the entry leaves the [`PendingPool`] and the caller is told
//!   to show the confirmation screen for the counterpart. On failure the
//!   entry stays pooled, the state becomes `Failed`, and the caller is told
//!   to go back. No automatic retry.
//! - If the requesting view was torn down meanwhile, the workflow state and
//!   pool are still updated but the view gets [`Navigation::Detached`].
//! - If the future itself is dropped before the service answers (timeout,
//!   task abort, panic), the claim is released as `Failed` and the entry
//!   stays pooled for retry.

pub mod capability;
pub mod state;
pub mod view;

pub use capability::{LocalUser, SubmissionService, WalletDirectory};
pub use state::{Resolution, WorkflowState};
pub use view::ViewToken;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::detail::{counterpart_label, Action};
use crate::pending::{PendingEntry, PendingPool};

// ---------------------------------------------------------------------------
// Errors and outcomes
// ---------------------------------------------------------------------------

/// Why a confirm or reject was refused before anything was submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// Another submission touching this hash is still running.
    #[error("{hash} already has a submission in flight ({state})")]
    AlreadyInFlight {
        /// The hash that is busy (parent or batch member).
        hash: String,
        /// Its current state.
        state: WorkflowState,
    },

    /// The hash was already confirmed or rejected.
    #[error("{hash} is already resolved ({state})")]
    AlreadyResolved {
        /// The resolved hash (parent or batch member).
        hash: String,
        /// Its terminal state.
        state: WorkflowState,
    },
}

/// Where the caller should take the user once a submission completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Reset to the confirmation screen for `resolution`, naming the
    /// counterpart.
    Confirmation {
        resolution: Resolution,
        nickname: String,
    },
    /// Return to the previous screen. Nothing was changed.
    Back,
    /// The requesting view is gone; its result was discarded.
    Detached,
}

// ---------------------------------------------------------------------------
// In-flight claim
// ---------------------------------------------------------------------------

/// Holds the in-flight claim on every hash of an entry and counts towards
/// [`ConfirmationWorkflow::is_loading`] while it lives.
///
/// [`Claim::settle`] writes the outcome. A claim dropped without settling
/// (the caller dropped the future, or the service panicked) marks its
/// hashes `Failed` so the entry can be retried.
struct Claim<'a> {
    workflow: &'a ConfirmationWorkflow,
    entry: &'a PendingEntry,
    resolution: Resolution,
    settled: bool,
}

impl<'a> Claim<'a> {
    fn settle(mut self, outcome: WorkflowState) {
        self.workflow.release(self.entry, outcome);
        self.settled = true;
    }
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!(
                hash = %self.entry.hash(),
                action = %self.resolution,
                "submission abandoned before completion"
            );
            self.workflow.release(self.entry, WorkflowState::Failed);
        }
        self.workflow.loading.fetch_sub(1, Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// ConfirmationWorkflow
// ---------------------------------------------------------------------------

/// Drives confirm and reject for pending entries.
///
/// Thread safety: per-hash states live in a `DashMap` for lock-free reads;
/// claiming and releasing the hashes of an entry happens under one mutex so
/// a batch is claimed all at once or not at all. The mutex is never held
/// across an await.
///
/// Terminal states are kept for the life of the workflow so that a late
/// confirm or reject is answered with [`WorkflowError::AlreadyResolved`]
/// instead of being submitted again. Memory grows with the number of
/// entries resolved; drop the workflow (or call [`Self::forget`]) once a
/// hash can no longer be offered to the user.
pub struct ConfirmationWorkflow {
    submission: Arc<dyn SubmissionService>,
    directory: Arc<dyn WalletDirectory>,
    pool: Arc<PendingPool>,
    states: DashMap<String, WorkflowState>,
    transitions: Mutex<()>,
    loading: AtomicUsize,
}

impl ConfirmationWorkflow {
    pub fn new(
        submission: Arc<dyn SubmissionService>,
        directory: Arc<dyn WalletDirectory>,
        pool: Arc<PendingPool>,
    ) -> Self {
        Self {
            submission,
            directory,
            pool,
            states: DashMap::new(),
            transitions: Mutex::new(()),
            loading: AtomicUsize::new(0),
        }
    }

    /// Confirms `entry` (and every batch member with it).
    pub async fn confirm(
        &self,
        entry: &PendingEntry,
        view: &ViewToken,
    ) -> Result<Navigation, WorkflowError> {
        self.resolve(entry, Resolution::Confirm, view).await
    }

    /// Rejects `entry` (and every batch member with it).
    pub async fn reject(
        &self,
        entry: &PendingEntry,
        view: &ViewToken,
    ) -> Result<Navigation, WorkflowError> {
        self.resolve(entry, Resolution::Reject, view).await
    }

    /// Runs the submission behind a detail-screen button.
    pub async fn perform(
        &self,
        entry: &PendingEntry,
        action: Action,
        view: &ViewToken,
    ) -> Result<Navigation, WorkflowError> {
        self.resolve(entry, action.resolution(), view).await
    }

    /// Current state of `hash`. Unknown hashes are `Proposed`.
    pub fn state(&self, hash: &str) -> WorkflowState {
        self.states
            .get(hash)
            .map(|state| *state.value())
            .unwrap_or(WorkflowState::Proposed)
    }

    pub fn is_in_flight(&self, hash: &str) -> bool {
        self.state(hash).is_in_flight()
    }

    /// `true` while any submission is running.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst) > 0
    }

    /// Clears the recorded state of every hash of `entry` unless a
    /// submission for it is still in flight. Returns `false` in that case.
    pub fn forget(&self, entry: &PendingEntry) -> bool {
        let _transition = self.transitions.lock();
        if entry.hashes().any(|hash| self.is_in_flight(hash)) {
            return false;
        }
        for hash in entry.hashes() {
            self.states.remove(hash);
        }
        true
    }

    pub fn pool(&self) -> &Arc<PendingPool> {
        &self.pool
    }

    async fn resolve(
        &self,
        entry: &PendingEntry,
        resolution: Resolution,
        view: &ViewToken,
    ) -> Result<Navigation, WorkflowError> {
        let claim = self.claim(entry, resolution)?;

        info!(
            hash = %entry.hash(),
            members = entry.members().len(),
            action = %resolution,
            "submitting pending transaction"
        );

        let success = match resolution {
            Resolution::Confirm => self.submission.submit_confirmation(entry).await,
            Resolution::Reject => self.submission.submit_rejection(entry).await,
        };

        let outcome = if success {
            resolution.success_state()
        } else {
            WorkflowState::Failed
        };
        claim.settle(outcome);

        if success {
            self.pool.remove(entry.hash());
        } else {
            warn!(hash = %entry.hash(), action = %resolution, "submission failed");
        }

        if !view.is_live() {
            debug!(hash = %entry.hash(), state = %outcome, "view torn down, discarding result");
            return Ok(Navigation::Detached);
        }

        if !success {
            return Ok(Navigation::Back);
        }

        let user = self.directory.local_user();
        Ok(Navigation::Confirmation {
            resolution,
            nickname: counterpart_label(entry.parent(), &user.address),
        })
    }

    /// Moves every hash of `entry` into the in-flight state, or none of them.
    fn claim<'a>(
        &'a self,
        entry: &'a PendingEntry,
        resolution: Resolution,
    ) -> Result<Claim<'a>, WorkflowError> {
        let _transition = self.transitions.lock();

        for hash in entry.hashes() {
            let state = self.state(hash);
            if state.accepts_submission() {
                continue;
            }
            let hash = hash.to_string();
            return Err(if state.is_in_flight() {
                warn!(%hash, %state, action = %resolution, "refusing concurrent submission");
                WorkflowError::AlreadyInFlight { hash, state }
            } else {
                WorkflowError::AlreadyResolved { hash, state }
            });
        }

        let in_flight = resolution.in_flight_state();
        for hash in entry.hashes() {
            self.states.insert(hash.to_string(), in_flight);
        }
        self.loading.fetch_add(1, Ordering::SeqCst);

        Ok(Claim {
            workflow: self,
            entry,
            resolution,
            settled: false,
        })
    }

    fn release(&self, entry: &PendingEntry, outcome: WorkflowState) {
        let _transition = self.transitions.lock();
        for hash in entry.hashes() {
            self.states.insert(hash.to_string(), outcome);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pending::{PendingTransaction, PendingTransactionData};
    use std::sync::atomic::AtomicBool;

    struct Scripted {
        succeed: AtomicBool,
        confirmations: AtomicUsize,
        rejections: AtomicUsize,
    }

    impl Scripted {
        fn new(succeed: bool) -> Arc<Self> {
            Arc::new(Self {
                succeed: AtomicBool::new(succeed),
                confirmations: AtomicUsize::new(0),
                rejections: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait::async_trait]
    impl SubmissionService for Scripted {
        async fn submit_confirmation(&self, _entry: &PendingEntry) -> bool {
            self.confirmations.fetch_add(1, Ordering::SeqCst);
            self.succeed.load(Ordering::SeqCst)
        }

        async fn submit_rejection(&self, _entry: &PendingEntry) -> bool {
            self.rejections.fetch_add(1, Ordering::SeqCst);
            self.succeed.load(Ordering::SeqCst)
        }
    }

    struct Me(&'static str);

    impl WalletDirectory for Me {
        fn local_user(&self) -> LocalUser {
            LocalUser::new(self.0)
        }

        fn currency_for_contract(&self, _ucac: &str) -> String {
            "USD".to_string()
        }
    }

    fn entry() -> PendingEntry {
        PendingEntry::single(
            PendingTransaction::new(&PendingTransactionData {
                creditor: "0xA1".to_string(),
                debtor: "0xB2".to_string(),
                amount: 100,
                memo: "lunch".to_string(),
                ucac: "0xC3".to_string(),
                submitter: "0xB2".to_string(),
                hash: "h1".to_string(),
                creditor_nickname: Some("alice".to_string()),
                debtor_nickname: Some("bob".to_string()),
                ..Default::default()
            })
            .unwrap(),
        )
    }

    fn workflow(service: Arc<Scripted>) -> ConfirmationWorkflow {
        let pool = Arc::new(PendingPool::new());
        pool.insert(entry());
        ConfirmationWorkflow::new(service, Arc::new(Me("0xA1")), pool)
    }

    #[tokio::test]
    async fn confirm_success_names_counterpart() {
        let service = Scripted::new(true);
        let wf = workflow(service.clone());

        let nav = wf.confirm(&entry(), &ViewToken::new()).await.unwrap();
        assert_eq!(
            nav,
            Navigation::Confirmation {
                resolution: Resolution::Confirm,
                nickname: "bob".to_string(),
            }
        );
        assert_eq!(wf.state("h1"), WorkflowState::Confirmed);
        assert!(!wf.pool().contains("h1"));
        assert!(!wf.is_loading());
    }

    #[tokio::test]
    async fn failure_goes_back_and_keeps_entry() {
        let service = Scripted::new(false);
        let wf = workflow(service.clone());

        let nav = wf.reject(&entry(), &ViewToken::new()).await.unwrap();
        assert_eq!(nav, Navigation::Back);
        assert_eq!(wf.state("h1"), WorkflowState::Failed);
        assert!(wf.pool().contains("h1"));
    }

    #[tokio::test]
    async fn failed_entry_can_be_retried() {
        let service = Scripted::new(false);
        let wf = workflow(service.clone());
        wf.confirm(&entry(), &ViewToken::new()).await.unwrap();

        service.succeed.store(true, Ordering::SeqCst);
        let nav = wf.confirm(&entry(), &ViewToken::new()).await.unwrap();
        assert!(matches!(nav, Navigation::Confirmation { .. }));
        assert_eq!(service.confirmations.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn resolved_entry_refuses_further_submissions() {
        let service = Scripted::new(true);
        let wf = workflow(service.clone());
        wf.reject(&entry(), &ViewToken::new()).await.unwrap();

        let err = wf.confirm(&entry(), &ViewToken::new()).await.unwrap_err();
        assert_eq!(
            err,
            WorkflowError::AlreadyResolved {
                hash: "h1".to_string(),
                state: WorkflowState::Rejected,
            }
        );
        assert_eq!(service.confirmations.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn torn_down_view_is_detached() {
        let service = Scripted::new(true);
        let wf = workflow(service.clone());
        let view = ViewToken::new();
        view.tear_down();

        let nav = wf.confirm(&entry(), &view).await.unwrap();
        assert_eq!(nav, Navigation::Detached);
        // The submission itself still ran to completion.
        assert_eq!(service.confirmations.load(Ordering::SeqCst), 1);
        assert_eq!(wf.state("h1"), WorkflowState::Confirmed);
    }

    #[tokio::test]
    async fn cancel_action_submits_rejection() {
        let service = Scripted::new(true);
        let wf = workflow(service.clone());

        let nav = wf.perform(&entry(), Action::Cancel, &ViewToken::new()).await.unwrap();
        assert!(matches!(
            nav,
            Navigation::Confirmation { resolution: Resolution::Reject, .. }
        ));
        assert_eq!(service.rejections.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn forget_clears_terminal_states() {
        let service = Scripted::new(true);
        let wf = workflow(service.clone());
        wf.confirm(&entry(), &ViewToken::new()).await.unwrap();
        assert_eq!(wf.state("h1"), WorkflowState::Confirmed);

        assert!(wf.forget(&entry()));
        assert_eq!(wf.state("h1"), WorkflowState::Proposed);
    }

    #[test]
    fn unknown_hash_is_proposed() {
        let wf = workflow(Scripted::new(true));
        assert_eq!(wf.state("nope"), WorkflowState::Proposed);
        assert!(!wf.is_in_flight("nope"));
    }
}
