//! # Pending Transactions
//!
//! Proposed credit records that are waiting for the counterpart to confirm
//! or reject them.
//!
//! ```text
//! transaction.rs: PendingTransaction and its raw wire data
//! entry.rs      : PendingEntry: a single proposal or an atomic batch
//! pool.rs       : PendingPool: in-memory registry keyed by hash
//! ```
//!
//! A [`PendingEntry::Batch`] is resolved as one unit. Every member shares
//! the parent's submitter and the parent's two parties, so one confirmation
//! or rejection covers the whole set and no subset can be resolved alone.

pub mod entry;
pub mod pool;
pub mod transaction;

pub use entry::{Batch, PendingEntry, PendingEntryData};
pub use pool::PendingPool;
pub use transaction::{PendingTransaction, PendingTransactionData, Role};

use credit_protocol::CreditRecordError;
use thiserror::Error;

/// Errors raised while building pending transactions and batches.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PendingError {
    /// The underlying credit record rejected the input.
    #[error("invalid credit record: {0}")]
    InvalidRecord(#[from] CreditRecordError),

    /// A batch member was proposed by someone other than the parent's submitter.
    #[error("batch member {hash} submitted by {found}, expected {expected}")]
    SubmitterMismatch {
        /// Hash of the offending member.
        hash: String,
        /// The parent's submitter.
        expected: String,
        /// The member's submitter.
        found: String,
    },

    /// A batch member is between different parties than the parent.
    #[error("batch member {hash} is not between the same parties as its parent")]
    CounterpartMismatch {
        /// Hash of the offending member.
        hash: String,
    },

    /// Two transactions in one batch share a hash.
    #[error("duplicate hash in batch: {0}")]
    DuplicateHash(String),
}
