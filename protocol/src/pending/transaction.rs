//! A proposed credit record plus submission metadata.

use credit_protocol::CreditRecord;
use serde::{Deserialize, Serialize};

use super::PendingError;
use crate::address::{normalize, same_address};
use crate::transfer::{OutgoingTransfer, TransferError};

// ---------------------------------------------------------------------------
// Wire data
// ---------------------------------------------------------------------------

/// Raw fields of a pending transaction as they arrive from the network or
/// from a draft in the UI. Field names are the wire contract.
///
/// Address fields default to empty so that a missing field surfaces as a
/// credit-record validation error rather than a decode error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingTransactionData {
    #[serde(default)]
    pub creditor: String,
    #[serde(default)]
    pub debtor: String,
    /// Base-unit amount.
    pub amount: u64,
    #[serde(default)]
    pub memo: String,
    /// Ignored on construction.
    #[serde(default)]
    pub nonce: u64,
    #[serde(default)]
    pub ucac: String,
    #[serde(default)]
    pub submitter: String,
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub creditor_nickname: Option<String>,
    #[serde(default)]
    pub debtor_nickname: Option<String>,
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Which side of the debt an address is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Is owed the amount.
    Creditor,
    /// Owes the amount.
    Debtor,
}

// ---------------------------------------------------------------------------
// PendingTransaction
// ---------------------------------------------------------------------------

/// An unconfirmed credit record awaiting the counterpart's confirmation or
/// rejection.
///
/// The wrapped [`CreditRecord`] is the single source of truth for ucac,
/// parties, amount and memo; the accessors read straight through to it and
/// nothing can be set after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransaction {
    credit_record: CreditRecord,
    creditor_nickname: Option<String>,
    debtor_nickname: Option<String>,
    submitter: String,
    hash: String,
}

impl PendingTransaction {
    /// Builds a pending transaction from raw fields.
    ///
    /// Addresses are canonicalized before the credit record validates them.
    /// The record's nonce is always 0 whatever `data.nonce` says: a pending
    /// proposal never carries a finalized nonce.
    pub fn new(data: &PendingTransactionData) -> Result<Self, PendingError> {
        let credit_record = CreditRecord::new(
            normalize(&data.ucac),
            normalize(&data.creditor),
            normalize(&data.debtor),
            data.amount,
            &data.memo,
            0,
        )?;

        Ok(Self {
            credit_record,
            creditor_nickname: data.creditor_nickname.clone(),
            debtor_nickname: data.debtor_nickname.clone(),
            submitter: normalize(&data.submitter).to_string(),
            hash: data.hash.clone(),
        })
    }

    pub fn creditor_address(&self) -> &str {
        self.credit_record.creditor_address()
    }

    pub fn debtor_address(&self) -> &str {
        self.credit_record.debtor_address()
    }

    /// Base-unit amount of the debt.
    pub fn amount(&self) -> u64 {
        self.credit_record.amount()
    }

    pub fn memo(&self) -> &str {
        self.credit_record.memo()
    }

    /// Address of the contract governing this debt type.
    pub fn ucac(&self) -> &str {
        self.credit_record.ucac_address()
    }

    /// Always 0 for a pending transaction.
    pub fn nonce(&self) -> u64 {
        self.credit_record.nonce()
    }

    /// Canonical address of the party that proposed this transaction.
    pub fn submitter(&self) -> &str {
        &self.submitter
    }

    /// Stable key of this proposal.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn creditor_nickname(&self) -> Option<&str> {
        self.creditor_nickname.as_deref()
    }

    pub fn debtor_nickname(&self) -> Option<&str> {
        self.debtor_nickname.as_deref()
    }

    /// The side `address` is on, if it is a party at all.
    pub fn role_of(&self, address: &str) -> Option<Role> {
        let address = normalize(address);
        if !self.credit_record.involves(address) {
            None
        } else if address == self.creditor_address() {
            Some(Role::Creditor)
        } else {
            Some(Role::Debtor)
        }
    }

    /// Returns `true` if `address` proposed this transaction.
    pub fn submitted_by(&self, address: &str) -> bool {
        same_address(address, &self.submitter)
    }

    /// Returns `true` if both transactions are between the same two parties,
    /// in either direction.
    pub fn same_parties(&self, other: &PendingTransaction) -> bool {
        let (a, b) = (self.creditor_address(), self.debtor_address());
        let (c, d) = (other.creditor_address(), other.debtor_address());
        (a == c && b == d) || (a == d && b == c)
    }

    /// The transfer that settles this debt on chain: debtor pays creditor
    /// the record amount.
    pub fn settlement_transfer(
        &self,
        amount_per_base_unit: u128,
        gas_price: u64,
        gas: u64,
    ) -> Result<OutgoingTransfer, TransferError> {
        OutgoingTransfer::new(
            self.debtor_address(),
            self.creditor_address(),
            self.amount(),
            amount_per_base_unit,
            gas_price,
            gas,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
