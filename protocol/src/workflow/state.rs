//! Workflow states and the two ways a pending entry can be resolved.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// The two mutually exclusive outcomes a user can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Confirm,
    Reject,
}

impl Resolution {
    /// The state held while the submission is in flight.
    pub fn in_flight_state(self) -> WorkflowState {
        match self {
            Self::Confirm => WorkflowState::Confirming,
            Self::Reject => WorkflowState::Rejecting,
        }
    }

    /// The terminal state reached when the submission succeeds.
    pub fn success_state(self) -> WorkflowState {
        match self {
            Self::Confirm => WorkflowState::Confirmed,
            Self::Reject => WorkflowState::Rejected,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Confirm => write!(f, "confirm"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

// ---------------------------------------------------------------------------
// WorkflowState
// ---------------------------------------------------------------------------

/// Lifecycle of a pending entry inside the confirmation workflow.
///
/// ```text
///   Proposed ──confirm──► Confirming ──ok──► Confirmed
///      ▲   └──reject───► Rejecting  ──ok──► Rejected
///      │                      │
///      └──── retry ─── Failed ◄┘ (submission returned false)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkflowState {
    /// Initial: nothing submitted yet.
    Proposed,
    /// A confirmation is in flight.
    Confirming,
    /// A rejection is in flight.
    Rejecting,
    /// Terminal: the counterpart confirmed.
    Confirmed,
    /// Terminal: the proposal was rejected or cancelled.
    Rejected,
    /// The last submission failed. Confirm or reject may be retried.
    Failed,
}

impl WorkflowState {
    pub fn is_in_flight(self) -> bool {
        matches!(self, Self::Confirming | Self::Rejecting)
    }

    /// Confirmed or rejected; no further action is possible.
    pub fn is_resolved(self) -> bool {
        matches!(self, Self::Confirmed | Self::Rejected)
    }

    /// Whether a new confirm or reject may start from this state.
    pub fn accepts_submission(self) -> bool {
        matches!(self, Self::Proposed | Self::Failed)
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proposed => write!(f, "Proposed"),
            Self::Confirming => write!(f, "Confirming"),
            Self::Rejecting => write!(f, "Rejecting"),
            Self::Confirmed => write!(f, "Confirmed"),
            Self::Rejected => write!(f, "Rejected"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_states() {
        assert_eq!(Resolution::Confirm.in_flight_state(), WorkflowState::Confirming);
        assert_eq!(Resolution::Reject.in_flight_state(), WorkflowState::Rejecting);
        assert_eq!(Resolution::Confirm.success_state(), WorkflowState::Confirmed);
        assert_eq!(Resolution::Reject.success_state(), WorkflowState::Rejected);
    }

    #[test]
    fn only_proposed_and_failed_accept_submissions() {
        let accepting: Vec<WorkflowState> = [
            WorkflowState::Proposed,
            WorkflowState::Confirming,
            WorkflowState::Rejecting,
            WorkflowState::Confirmed,
            WorkflowState::Rejected,
            WorkflowState::Failed,
        ]
        .into_iter()
        .filter(|s| s.accepts_submission())
        .collect();
        assert_eq!(accepting, vec![WorkflowState::Proposed, WorkflowState::Failed]);
    }

    #[test]
    fn resolution_display_matches_route_type() {
        assert_eq!(Resolution::Confirm.to_string(), "confirm");
        assert_eq!(Resolution::Reject.to_string(), "reject");
        assert_eq!(serde_json::to_string(&Resolution::Reject).unwrap(), "\"reject\"");
    }
}
