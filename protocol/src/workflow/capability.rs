//! Collaborators the workflow depends on but does not implement.
//!
//! Transport, key management and profile storage live behind these traits.

use async_trait::async_trait;

use crate::pending::PendingEntry;

/// Network submission of confirmations and rejections.
///
/// Both calls take the whole entry: a batch goes out as one request and the
/// implementation decides how its members travel. `false` means the
/// submission failed for any reason.
#[async_trait]
pub trait SubmissionService: Send + Sync {
    async fn submit_confirmation(&self, entry: &PendingEntry) -> bool;

    async fn submit_rejection(&self, entry: &PendingEntry) -> bool;
}

/// The signed-in user as seen by the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalUser {
    /// Account address, with or without `0x`.
    pub address: String,
}

impl LocalUser {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

/// Read-only lookups the wallet answers from its own state.
pub trait WalletDirectory: Send + Sync {
    fn local_user(&self) -> LocalUser;

    /// Currency code (e.g. `"USD"`) of the debts governed by `ucac`.
    fn currency_for_contract(&self, ucac: &str) -> String;
}
