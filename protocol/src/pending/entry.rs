//! Single proposals and atomic batches.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::transaction::{PendingTransaction, PendingTransactionData};
use super::PendingError;

// ---------------------------------------------------------------------------
// Wire data
// ---------------------------------------------------------------------------

/// A pending transaction on the wire, optionally carrying its batch members
/// under `multiTransactions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingEntryData {
    #[serde(flatten)]
    pub transaction: PendingTransactionData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_transactions: Option<Vec<PendingTransactionData>>,
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

/// A parent plus at least one member, all from the same submitter and
/// between the same two parties, with no repeated hash.
///
/// Only [`PendingEntry::batch`] and [`PendingEntry::from_wire`] build one,
/// so every `Batch` in existence has passed those checks.
///
/// ```compile_fail
/// use lndr_protocol::pending::{Batch, PendingTransaction};
///
/// fn forge(parent: PendingTransaction) -> Batch {
///     Batch { parent, members: Vec::new() }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    parent: PendingTransaction,
    members: Vec<PendingTransaction>,
}

impl Batch {
    pub fn parent(&self) -> &PendingTransaction {
        &self.parent
    }

    /// Never empty.
    pub fn members(&self) -> &[PendingTransaction] {
        &self.members
    }
}

// ---------------------------------------------------------------------------
// PendingEntry
// ---------------------------------------------------------------------------

/// What the confirmation workflow operates on.
///
/// A `Batch` parent is the display entry for its members; confirming or
/// rejecting it resolves every member with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingEntry {
    /// One proposal on its own.
    Single(PendingTransaction),
    /// A parent plus members that must be resolved together.
    Batch(Batch),
}

impl PendingEntry {
    pub fn single(transaction: PendingTransaction) -> Self {
        Self::Single(transaction)
    }

    /// Groups already-built transactions under `parent`.
    ///
    /// An empty member list yields a [`PendingEntry::Single`]. Members must
    /// share the parent's submitter and parties, and no hash may repeat.
    pub fn batch(
        parent: PendingTransaction,
        members: Vec<PendingTransaction>,
    ) -> Result<Self, PendingError> {
        if members.is_empty() {
            return Ok(Self::Single(parent));
        }

        let mut seen = HashSet::with_capacity(members.len() + 1);
        seen.insert(parent.hash().to_string());

        for member in &members {
            if !seen.insert(member.hash().to_string()) {
                return Err(PendingError::DuplicateHash(member.hash().to_string()));
            }
            if member.submitter() != parent.submitter() {
                return Err(PendingError::SubmitterMismatch {
                    hash: member.hash().to_string(),
                    expected: parent.submitter().to_string(),
                    found: member.submitter().to_string(),
                });
            }
            if !member.same_parties(&parent) {
                return Err(PendingError::CounterpartMismatch {
                    hash: member.hash().to_string(),
                });
            }
        }

        Ok(Self::Batch(Batch { parent, members }))
    }

    /// Decodes wire data. Each member is built on its own first, then the
    /// batch is assembled from the finished values.
    pub fn from_wire(data: &PendingEntryData) -> Result<Self, PendingError> {
        let parent = PendingTransaction::new(&data.transaction)?;
        let members = data
            .multi_transactions
            .iter()
            .flatten()
            .map(PendingTransaction::new)
            .collect::<Result<Vec<_>, _>>()?;
        Self::batch(parent, members)
    }

    /// The display entry: the transaction itself, or the batch parent.
    pub fn parent(&self) -> &PendingTransaction {
        match self {
            Self::Single(tx) => tx,
            Self::Batch(batch) => batch.parent(),
        }
    }

    /// Batch members; empty for a single proposal.
    pub fn members(&self) -> &[PendingTransaction] {
        match self {
            Self::Single(_) => &[],
            Self::Batch(batch) => batch.members(),
        }
    }

    /// Key of the entry (the parent's hash).
    pub fn hash(&self) -> &str {
        self.parent().hash()
    }

    pub fn is_batch(&self) -> bool {
        matches!(self, Self::Batch(_))
    }

    /// Parent hash followed by every member hash.
    pub fn hashes(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.hash()).chain(self.members().iter().map(PendingTransaction::hash))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
