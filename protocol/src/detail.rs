//! # Pending Transaction Detail
//!
//! Everything a detail screen needs to show a pending entry from the local
//! user's point of view: who the other party is, which way the debt runs,
//! which currency it is in, and which actions the user may take.
//!
//! The user is identified by comparing addresses with the parties of the
//! parent transaction. When the user is neither party the entry is shown
//! under a neutral label instead of failing.

use serde::Serialize;

use crate::address::same_address;
use crate::config::UNKNOWN_TRANSACTION_LABEL;
use crate::pending::{PendingEntry, PendingTransaction, Role};
use crate::workflow::{Resolution, WalletDirectory};

// ---------------------------------------------------------------------------
// Direction and actions
// ---------------------------------------------------------------------------

/// Which way the debt runs for the local user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The user is the creditor.
    Lend,
    /// The user is the debtor.
    Borrow,
    /// The user is not a party.
    Unknown,
}

impl Direction {
    pub fn of(transaction: &PendingTransaction, user_address: &str) -> Self {
        match transaction.role_of(user_address) {
            Some(Role::Creditor) => Self::Lend,
            Some(Role::Debtor) => Self::Borrow,
            None => Self::Unknown,
        }
    }
}

/// A button the detail screen offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Confirm,
    Reject,
    /// Withdraw one's own proposal. Submitted as a rejection.
    Cancel,
}

impl Action {
    pub fn resolution(self) -> Resolution {
        match self {
            Self::Confirm => Resolution::Confirm,
            Self::Reject | Self::Cancel => Resolution::Reject,
        }
    }
}

/// The submitter can only cancel; the counterpart can confirm or reject.
pub fn allowed_actions(transaction: &PendingTransaction, user_address: &str) -> Vec<Action> {
    if transaction.submitted_by(user_address) {
        vec![Action::Cancel]
    } else {
        vec![Action::Confirm, Action::Reject]
    }
}

// ---------------------------------------------------------------------------
// Counterpart
// ---------------------------------------------------------------------------

/// Address of the party on the other side from `user_address`.
///
/// The debtor if the user is the creditor, otherwise the creditor.
pub fn counterpart_address<'a>(transaction: &'a PendingTransaction, user_address: &str) -> &'a str {
    if same_address(user_address, transaction.creditor_address()) {
        transaction.debtor_address()
    } else {
        transaction.creditor_address()
    }
}

/// Display name of the other party, falling back to their address when no
/// nickname is known, or to [`UNKNOWN_TRANSACTION_LABEL`] when the user is
/// not a party.
pub fn counterpart_label(transaction: &PendingTransaction, user_address: &str) -> String {
    let (nickname, address) = match transaction.role_of(user_address) {
        Some(Role::Creditor) => (transaction.debtor_nickname(), transaction.debtor_address()),
        Some(Role::Debtor) => (transaction.creditor_nickname(), transaction.creditor_address()),
        None => return UNKNOWN_TRANSACTION_LABEL.to_string(),
    };
    nickname.unwrap_or(address).to_string()
}

// ---------------------------------------------------------------------------
// PendingDetail
// ---------------------------------------------------------------------------

/// Resolved view model for one pending entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingDetail {
    pub hash: String,
    pub title: String,
    pub direction: Direction,
    pub counterpart: String,
    /// `None` when the user is not a party.
    pub counterpart_address: Option<String>,
    pub currency: String,
    /// Base-unit amount of the parent entry.
    pub amount: u64,
    pub memo: String,
    /// Hashes of the batch members, in order. Empty for a single proposal.
    pub members: Vec<String>,
    pub actions: Vec<Action>,
}

impl PendingDetail {
    pub fn resolve(entry: &PendingEntry, directory: &dyn WalletDirectory) -> Self {
        let user = directory.local_user();
        let tx = entry.parent();
        let direction = Direction::of(tx, &user.address);
        let counterpart = counterpart_label(tx, &user.address);

        let title = match direction {
            Direction::Lend => format!("Pending loan to {counterpart}"),
            Direction::Borrow => format!("Pending debt to {counterpart}"),
            Direction::Unknown => UNKNOWN_TRANSACTION_LABEL.to_string(),
        };
        let counterpart_address = match direction {
            Direction::Unknown => None,
            _ => Some(counterpart_address(tx, &user.address).to_string()),
        };

        Self {
            hash: entry.hash().to_string(),
            title,
            direction,
            counterpart,
            counterpart_address,
            currency: directory.currency_for_contract(tx.ucac()),
            amount: tx.amount(),
            memo: tx.memo().trim().to_string(),
            members: entry.members().iter().map(|m| m.hash().to_string()).collect(),
            actions: allowed_actions(tx, &user.address),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pending::PendingTransactionData;
    use crate::workflow::LocalUser;

    struct Directory(&'static str);

    impl WalletDirectory for Directory {
        fn local_user(&self) -> LocalUser {
            LocalUser::new(self.0)
        }

        fn currency_for_contract(&self, ucac: &str) -> String {
            match ucac {
                "C3" => "USD".to_string(),
                _ => "ETH".to_string(),
            }
        }
    }

    fn lunch(submitter: &str, with_nicknames: bool) -> PendingTransaction {
        PendingTransaction::new(&PendingTransactionData {
            creditor: "0xA1".to_string(),
            debtor: "0xB2".to_string(),
            amount: 100,
            memo: "  lunch \n".to_string(),
            ucac: "0xC3".to_string(),
            submitter: submitter.to_string(),
            hash: "h1".to_string(),
            creditor_nickname: with_nicknames.then(|| "alice".to_string()),
            debtor_nickname: with_nicknames.then(|| "bob".to_string()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn direction_follows_role() {
        let tx = lunch("A1", true);
        assert_eq!(Direction::of(&tx, "0xA1"), Direction::Lend);
        assert_eq!(Direction::of(&tx, "B2"), Direction::Borrow);
        assert_eq!(Direction::of(&tx, "FF"), Direction::Unknown);
    }

    #[test]
    fn counterpart_of_creditor_is_debtor() {
        let tx = lunch("A1", true);
        assert_eq!(counterpart_label(&tx, "A1"), "bob");
        assert_eq!(counterpart_address(&tx, "A1"), "B2");
        assert_eq!(counterpart_label(&tx, "B2"), "alice");
        assert_eq!(counterpart_address(&tx, "B2"), "A1");
    }

    #[test]
    fn stranger_gets_neutral_label() {
        let tx = lunch("A1", true);
        assert_eq!(counterpart_label(&tx, "FF"), UNKNOWN_TRANSACTION_LABEL);
    }

    #[test]
    fn missing_nickname_falls_back_to_address() {
        let tx = lunch("A1", false);
        assert_eq!(counterpart_label(&tx, "A1"), "B2");
    }

    #[test]
    fn submitter_can_only_cancel() {
        let tx = lunch("0xA1", true);
        assert_eq!(allowed_actions(&tx, "A1"), vec![Action::Cancel]);
        assert_eq!(allowed_actions(&tx, "B2"), vec![Action::Confirm, Action::Reject]);
        assert_eq!(Action::Cancel.resolution(), Resolution::Reject);
    }

    #[test]
    fn detail_for_borrower() {
        let entry = PendingEntry::single(lunch("A1", true));
        let detail = PendingDetail::resolve(&entry, &Directory("0xB2"));
        assert_eq!(detail.title, "Pending debt to alice");
        assert_eq!(detail.direction, Direction::Borrow);
        assert_eq!(detail.counterpart_address.as_deref(), Some("A1"));
        assert_eq!(detail.currency, "USD");
        assert_eq!(detail.amount, 100);
        assert_eq!(detail.memo, "lunch");
        assert!(detail.members.is_empty());
        assert_eq!(detail.actions, vec![Action::Confirm, Action::Reject]);
    }

    #[test]
    fn detail_for_stranger() {
        let entry = PendingEntry::single(lunch("A1", true));
        let detail = PendingDetail::resolve(&entry, &Directory("FF"));
        assert_eq!(detail.title, UNKNOWN_TRANSACTION_LABEL);
        assert_eq!(detail.direction, Direction::Unknown);
        assert_eq!(detail.counterpart_address, None);
    }
}
